// Host-side tests for the texture cache and variant switcher.

mod common;

use std::rc::Rc;

use common::*;
use futures::FutureExt;
use pollster::block_on;
use viewer_core::*;

fn switcher() -> TextureSwitcher<FakeLoader> {
    TextureSwitcher::new(TextureCache::new(FakeLoader::default(), variants()))
}

#[test]
fn get_twice_loads_once_and_returns_same_handle() {
    let cache = TextureCache::new(FakeLoader::default(), variants());
    let a = block_on(cache.get("beige")).expect("beige");
    let b = block_on(cache.get("beige")).expect("beige again");
    assert!(Rc::ptr_eq(&a, &b));
    assert_eq!(cache.loader().loads.get(), 1);
    assert!(cache.is_ready("beige"));
    assert_eq!(a.uri, "tex/beige.jpg");
}

#[test]
fn concurrent_gets_share_one_load() {
    let cache = TextureCache::new(FakeLoader::default(), variants());
    let (a, b) = block_on(async { futures::join!(cache.get("grey"), cache.get("grey")) });
    assert!(Rc::ptr_eq(&a.expect("a"), &b.expect("b")));
    assert_eq!(cache.loader().loads.get(), 1);
}

#[test]
fn failed_load_is_not_memoized() {
    let loader = FakeLoader::default();
    loader.failing.borrow_mut().push("tex/grey.jpg".into());
    let cache = TextureCache::new(loader, variants());

    let err = block_on(cache.get("grey")).expect_err("should fail");
    assert!(matches!(err, TextureError::Load { .. }));
    assert!(!cache.is_ready("grey"));

    cache.loader().failing.borrow_mut().clear();
    assert!(block_on(cache.get("grey")).is_ok());
    assert_eq!(cache.loader().loads.get(), 2);
}

#[test]
fn unknown_and_original_are_not_fetched() {
    let cache = TextureCache::new(FakeLoader::default(), variants());
    assert_eq!(
        block_on(cache.get("walnut")),
        Err(TextureError::UnknownVariant("walnut".into()))
    );
    assert!(block_on(cache.get("original")).is_err());
    assert_eq!(cache.loader().loads.get(), 0);
}

#[test]
fn preload_logs_failures_and_keeps_going() {
    let loader = FakeLoader::default();
    loader.failing.borrow_mut().push("tex/beige.jpg".into());
    let cache = TextureCache::new(loader, variants());
    assert_eq!(block_on(cache.preload_all()), 1);
    assert!(cache.is_ready("grey"));
    assert!(!cache.is_ready("beige"));
}

#[test]
fn cycling_wraps_to_original_handle() {
    let sw = switcher();
    let surface = FakeSurface::with_texture("model/base.png");
    let original = surface.current().expect("shipped texture");
    assert!(sw.capture_original(&surface));

    let v = block_on(sw.cycle(&surface)).expect("beige").expect("not busy");
    assert_eq!(v.name, "beige");
    assert_eq!(surface.current().expect("tex").uri, "tex/beige.jpg");

    block_on(sw.cycle(&surface)).expect("grey");
    assert_eq!(sw.index(), 2);

    let v = block_on(sw.cycle(&surface)).expect("original").expect("not busy");
    assert!(v.is_original());
    assert_eq!(sw.index(), 0);
    assert!(Rc::ptr_eq(&surface.current().expect("tex"), &original));
    assert_eq!(surface.renders.get(), 3);
}

#[test]
fn original_is_captured_once() {
    let sw = switcher();
    let surface = FakeSurface::with_texture("model/base.png");
    sw.capture_original(&surface);
    let first = sw.original().expect("captured");
    block_on(sw.cycle(&surface)).expect("beige");
    sw.capture_original(&surface);
    assert!(Rc::ptr_eq(&sw.original().expect("still"), &first));
}

#[test]
fn failed_switch_keeps_selection() {
    let sw = switcher();
    sw.cache()
        .loader()
        .failing
        .borrow_mut()
        .push("tex/grey.jpg".into());
    let surface = FakeSurface::with_texture("model/base.png");
    sw.capture_original(&surface);

    block_on(sw.cycle(&surface)).expect("beige");
    assert_eq!(sw.index(), 1);

    assert!(block_on(sw.cycle(&surface)).is_err());
    assert_eq!(sw.index(), 1);
    assert_eq!(sw.current().map(|v| v.name.as_str()), Some("beige"));
    assert_eq!(surface.current().expect("tex").uri, "tex/beige.jpg");
}

#[test]
fn restoring_without_captured_original_is_reported() {
    let sw = switcher();
    let surface = FakeSurface::default();
    assert!(!sw.capture_original(&surface));
    assert_eq!(
        block_on(sw.select(&surface, 0)),
        Err(TextureError::MissingOriginal)
    );
    assert_eq!(surface.renders.get(), 0);
}

#[test]
fn select_out_of_range_is_an_error() {
    let sw = switcher();
    let surface = FakeSurface::default();
    assert!(block_on(sw.select(&surface, 9)).is_err());
    assert_eq!(sw.index(), 0);
}

#[test]
fn dropped_switch_does_not_leave_switcher_busy() {
    let sw = switcher();
    sw.cache()
        .loader()
        .stalled
        .borrow_mut()
        .push("tex/beige.jpg".into());
    let surface = FakeSurface::with_texture("model/base.png");
    sw.capture_original(&surface);

    let mut stuck = sw.cycle(&surface).boxed_local();
    assert!((&mut stuck).now_or_never().is_none());
    // a second switch while the first is loading is ignored
    assert_eq!(sw.select(&surface, 2).now_or_never(), Some(Ok(None)));
    drop(stuck);

    let v = block_on(sw.select(&surface, 2)).expect("grey");
    assert_eq!(v.map(|v| v.name), Some("grey".to_string()));
    assert_eq!(sw.index(), 2);
    assert_eq!(surface.current().expect("tex").uri, "tex/grey.jpg");
}
