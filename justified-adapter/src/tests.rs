use crate::*;

use justified::{
    AssetLoader, DisplayTree, GalleryError, GalleryOptions, ImageDescriptor, LoadState,
    LoadTicket, NodeKind, NodeStyle, ScrollDirection, SubResource, ViewportMetrics,
};

#[derive(Debug, Default)]
struct Host {
    raf_unsupported: bool,
    frames: usize,
    timeouts: Vec<u64>,
    scroll_listeners: i32,
    resize_listeners: i32,
}

impl FrameScheduler for Host {
    fn request_animation_frame(&mut self) -> bool {
        if self.raf_unsupported {
            return false;
        }
        self.frames += 1;
        true
    }

    fn set_timeout(&mut self, delay_ms: u64) {
        self.timeouts.push(delay_ms);
    }
}

impl EventSource for Host {
    fn add_scroll_listener(&mut self) {
        self.scroll_listeners += 1;
    }

    fn remove_scroll_listener(&mut self) {
        self.scroll_listeners -= 1;
    }

    fn add_resize_listener(&mut self) {
        self.resize_listeners += 1;
    }

    fn remove_resize_listener(&mut self) {
        self.resize_listeners -= 1;
    }
}

#[derive(Debug, Default)]
struct Tree {
    next: u32,
    attached: Vec<u32>,
}

impl DisplayTree for Tree {
    type Node = u32;

    fn create_node(&mut self, _kind: NodeKind) -> u32 {
        self.next += 1;
        self.next
    }

    fn append_child(&mut self, parent: &u32, child: &u32) {
        if *parent == 0 {
            self.attached.push(*child);
        }
    }

    fn insert_before(&mut self, parent: &u32, child: &u32, reference: &u32) {
        if *parent == 0 {
            let at = self.attached.iter().position(|n| n == reference).unwrap();
            self.attached.insert(at, *child);
        }
    }

    fn remove_child(&mut self, parent: &u32, child: &u32) {
        if *parent == 0 {
            self.attached.retain(|n| n != child);
        }
    }

    fn set_style(&mut self, _node: &u32, _style: &NodeStyle) {}

    fn set_height(&mut self, _node: &u32, _height: u32) {}

    fn mark_loaded(&mut self, _node: &u32) {}
}

#[derive(Debug, Default)]
struct Loader {
    tickets: Vec<LoadTicket>,
}

impl AssetLoader<u32> for Loader {
    fn begin_load(&mut self, _node: &u32, _url: &str, ticket: LoadTicket) {
        self.tickets.push(ticket);
    }
}

fn metrics(window_width: u32) -> ViewportMetrics {
    ViewportMetrics {
        window_width,
        window_height: 800,
        container_width: window_width,
        container_top: 0,
    }
}

/// 200 square images in rows of four 250px items at 1000px.
fn controller(resize: &SharedResizeRegistry) -> Controller<Tree, Loader> {
    Controller::initialize(
        Tree::default(),
        Loader::default(),
        Some(0),
        (0..200).map(|i| ImageDescriptor::new(format!("{i}.jpg"), 1.0)),
        GalleryOptions::new().with_space_between_images(0),
        resize.clone(),
    )
    .unwrap()
}

#[test]
fn scroll_events_coalesce_into_one_pass() {
    let mut s = ScrollCoalescer::new();
    assert!(s.record(100));
    assert!(!s.record(200));
    assert!(!s.record(150));
    assert!(s.is_pending());
    assert_eq!(s.take(), Some((150, ScrollDirection::Up)));
    assert_eq!(s.take(), None);

    // An unchanged offset keeps the last direction.
    assert!(s.record(150));
    assert_eq!(s.take(), Some((150, ScrollDirection::Up)));
    assert!(s.record(400));
    assert_eq!(s.take(), Some((400, ScrollDirection::Down)));
}

#[test]
fn frame_scheduling_falls_back_to_timer() {
    let mut host = Host::default();
    schedule_frame(&mut host);
    assert_eq!(host.frames, 1);
    assert!(host.timeouts.is_empty());

    host.raf_unsupported = true;
    schedule_frame(&mut host);
    assert_eq!(host.frames, 1);
    assert_eq!(host.timeouts, vec![FALLBACK_FRAME_DELAY_MS]);
}

#[test]
fn resize_registry_batches_and_manages_listener() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let mut host = Host::default();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut registry = ResizeRegistry::new();
    assert!(!registry.notify(metrics(800), &mut host));

    let a = registry.subscribe(&mut host, {
        let seen = Rc::clone(&seen);
        move |m, now| seen.borrow_mut().push(("a", m.window_width, now))
    });
    let b = registry.subscribe(&mut host, {
        let seen = Rc::clone(&seen);
        move |m, now| seen.borrow_mut().push(("b", m.window_width, now))
    });
    assert_eq!(host.resize_listeners, 1);
    assert_eq!(registry.len(), 2);

    assert!(registry.notify(metrics(800), &mut host));
    assert!(!registry.notify(metrics(900), &mut host));
    assert!(!registry.notify(metrics(1000), &mut host));
    assert_eq!(host.frames, 1);

    assert!(registry.run_pending(16));
    assert!(!registry.run_pending(32));
    assert_eq!(*seen.borrow(), vec![("a", 1000, 16), ("b", 1000, 16)]);

    assert!(registry.unsubscribe(&mut host, a));
    assert!(!registry.unsubscribe(&mut host, a));
    assert_eq!(host.resize_listeners, 1);
    assert!(registry.unsubscribe(&mut host, b));
    assert_eq!(host.resize_listeners, 0);
    assert!(!registry.is_listening());
}

#[test]
fn resize_registry_disable_and_re_enable() {
    let mut host = Host::default();
    let mut registry = ResizeRegistry::new();
    let _sub = registry.subscribe(&mut host, |_, _| {});

    registry.disable(&mut host);
    assert_eq!(host.resize_listeners, 0);
    assert!(!registry.notify(metrics(800), &mut host));

    registry.re_enable(&mut host);
    registry.re_enable(&mut host);
    assert_eq!(host.resize_listeners, 1);
    assert!(registry.notify(metrics(800), &mut host));
}

#[test]
fn missing_container_is_a_configuration_error() {
    let err = Controller::initialize(
        Tree::default(),
        Loader::default(),
        None,
        [ImageDescriptor::new("a.jpg", 1.0)],
        GalleryOptions::default(),
        ResizeRegistry::shared(),
    )
    .unwrap_err();
    assert!(matches!(err, GalleryError::MissingContainer));
}

#[test]
fn enable_runs_first_pass_and_attaches_listeners() {
    let resize = ResizeRegistry::shared();
    let mut host = Host::default();
    let mut c = controller(&resize);

    let pass = c.enable(&mut host, metrics(1000), 0, 0).unwrap();
    assert_eq!(pass.attached, 40);
    assert!(c.is_enabled());
    assert_eq!(host.scroll_listeners, 1);
    assert_eq!(host.resize_listeners, 1);
    assert_eq!(host.timeouts, vec![100]);
    assert_eq!(c.gallery().visible_indexes().len(), 40);
    assert_eq!(c.gallery().tree().attached.len(), 40);

    assert!(c.enable(&mut host, metrics(1000), 0, 0).is_none());
    assert_eq!(host.scroll_listeners, 1);
}

#[test]
fn frames_drive_scroll_passes_and_delayed_loads() {
    let resize = ResizeRegistry::shared();
    let mut host = Host::default();
    let mut c = controller(&resize);
    c.enable(&mut host, metrics(1000), 0, 0);

    assert!(c.on_scroll(9_000, &mut host));
    assert!(!c.on_scroll(9_500, &mut host));
    assert!(!c.on_scroll(10_000, &mut host));
    assert_eq!(host.frames, 1);

    let pass = c.on_frame(16, &mut host).unwrap();
    assert_eq!(pass.detached, 40);
    assert_eq!(pass.attached, 44);
    assert_eq!(c.gallery().scroll_offset(), 10_000);
    assert_eq!(c.gallery().scroll_direction(), ScrollDirection::Down);
    // The timer armed for 100ms is still ahead.
    assert_eq!(host.timeouts, vec![100]);

    // That timer fires: nothing is due yet, so it is re-armed for the new items.
    assert!(c.on_frame(100, &mut host).is_none());
    assert_eq!(host.timeouts, vec![100, 16]);
    assert!(c.gallery().loader().tickets.is_empty());

    c.on_frame(116, &mut host);
    assert_eq!(c.gallery().loader().tickets.len(), 88);
    let ticket = c
        .gallery()
        .loader()
        .tickets
        .iter()
        .copied()
        .find(|t| t.index == 160 && t.resource == SubResource::Thumbnail)
        .unwrap();
    assert!(c.complete_load(ticket));
    assert_eq!(c.gallery().load_state(160), LoadState::ThumbnailLoaded);
    assert!(!c.fail_load(ticket));
}

#[test]
fn resize_batch_relayouts_the_gallery() {
    let resize = ResizeRegistry::shared();
    let mut host = Host::default();
    let mut c = controller(&resize);
    c.enable(&mut host, metrics(1000), 0, 0);
    assert_eq!(c.gallery().layout().target_aspect_ratio, 4.0);

    assert!(resize.borrow_mut().notify(metrics(600), &mut host));
    assert!(!resize.borrow_mut().notify(metrics(500), &mut host));
    assert!(resize.borrow_mut().run_pending(50));

    let g = c.gallery();
    assert_eq!(g.metrics().window_width, 500);
    assert_eq!(g.layout().target_aspect_ratio, 2.0);
    // Two 250px squares per row: rows are 250px tall.
    assert_eq!(g.total_height(), 100 * 250);
    assert!(g.layout().rects.iter().all(|r| r.transition));
}

#[test]
fn disable_detaches_listeners_but_keeps_shared_registry_for_others() {
    let resize = ResizeRegistry::shared();
    let mut host = Host::default();
    let mut first = controller(&resize);
    let mut second = controller(&resize);
    first.enable(&mut host, metrics(1000), 0, 0);
    second.enable(&mut host, metrics(1000), 0, 0);
    assert_eq!(host.scroll_listeners, 2);
    assert_eq!(host.resize_listeners, 1);
    assert_eq!(resize.borrow().len(), 2);

    first.disable(&mut host);
    first.disable(&mut host);
    assert_eq!(host.scroll_listeners, 1);
    assert_eq!(host.resize_listeners, 1);
    assert!(!first.on_scroll(500, &mut host));
    assert!(first.on_frame(16, &mut host).is_none());

    second.disable(&mut host);
    assert_eq!(host.scroll_listeners, 0);
    assert_eq!(host.resize_listeners, 0);
    assert!(resize.borrow().is_empty());
}

#[test]
fn attachment_runs_cover_all_items() {
    let resize = ResizeRegistry::shared();
    let mut host = Host::default();
    let mut c = controller(&resize);
    c.enable(&mut host, metrics(1000), 0, 0);

    let runs = c.attachment_runs();
    assert_eq!(runs.len(), 2);
    assert_eq!(runs[0].len() + runs[1].len(), 200);
    assert!(runs[0].attached);
    assert!(!runs[1].attached);
}
