use super::*;

fn b(w: i32, h: i32) -> PixelBounds {
    PixelBounds::new(0, 0, w, h)
}

#[test]
fn pool_honors_bucket_cap() {
    let mut p = SurfacePool::new(SurfacePoolOpts {
        max_pool_bytes: 1 << 30,
        max_surfaces_per_bucket: 1,
    });

    let a = p.borrow(b(8, 8));
    let c = p.borrow(b(8, 8));
    assert_eq!(p.live(), 2);
    p.release(a);
    p.release(c);

    let st = p.stats();
    assert_eq!(st.retained_surfaces, 1);
    assert_eq!(st.live_surfaces, 0);
    assert_eq!(st.peak_live_surfaces, 2);
}

#[test]
fn pool_honors_global_byte_cap() {
    let bytes_8x8 = SurfaceKey::from_bounds(b(8, 8)).byte_len();
    let mut p = SurfacePool::new(SurfacePoolOpts {
        max_pool_bytes: bytes_8x8,
        max_surfaces_per_bucket: 8,
    });

    let a = p.borrow(b(8, 8));
    let c = p.borrow(b(8, 8));
    p.release(a);
    p.release(c);

    let st = p.stats();
    assert_eq!(st.retained_bytes, bytes_8x8);
    assert_eq!(st.retained_surfaces, 1);
    assert!(st.dropped_on_release >= 1);
}

#[test]
fn reused_surfaces_come_back_cleared_and_rehomed() {
    let mut p = SurfacePool::new(SurfacePoolOpts::default());
    let mut s = p.borrow(b(4, 4));
    s.fill([1.0, 1.0, 1.0, 1.0]);
    p.release(s);

    let moved = PixelBounds::new(10, 10, 14, 14);
    let s = p.borrow(moved);
    assert_eq!(s.bounds, moved);
    assert!(s.data.iter().all(|px| *px == TRANSPARENT_PX));
    let st = p.stats();
    assert_eq!(st.alloc_surfaces, 1);
    assert_eq!(st.reused_surfaces, 1);
}
