use justified::{
    AssetLoader, DisplayTree, GalleryOptions, ImageDescriptor, LoadTicket, NodeKind, NodeStyle,
    ViewportMetrics,
};
use justified_adapter::{Controller, EventSource, FrameScheduler, ResizeRegistry};

// Example: a host loop that forwards scroll/resize events and fires frames and timers.
//
// A real host would:
// - call on_scroll / notify from its event handlers
// - run run_pending + on_frame when a frame or timeout fires
// - report asset loads through complete_load

#[derive(Default)]
struct Host {
    frame_requested: bool,
    timer_at: Option<u64>,
    now_ms: u64,
}

impl FrameScheduler for Host {
    fn request_animation_frame(&mut self) -> bool {
        self.frame_requested = true;
        true
    }

    fn set_timeout(&mut self, delay_ms: u64) {
        self.timer_at = Some(self.now_ms + delay_ms);
    }
}

impl EventSource for Host {
    fn add_scroll_listener(&mut self) {
        println!("+ scroll listener");
    }

    fn remove_scroll_listener(&mut self) {
        println!("- scroll listener");
    }

    fn add_resize_listener(&mut self) {
        println!("+ resize listener");
    }

    fn remove_resize_listener(&mut self) {
        println!("- resize listener");
    }
}

#[derive(Default)]
struct Nodes(u32);

impl DisplayTree for Nodes {
    type Node = u32;

    fn create_node(&mut self, _kind: NodeKind) -> u32 {
        self.0 += 1;
        self.0
    }

    fn append_child(&mut self, _parent: &u32, _child: &u32) {}

    fn insert_before(&mut self, _parent: &u32, _child: &u32, _reference: &u32) {}

    fn remove_child(&mut self, _parent: &u32, _child: &u32) {}

    fn set_style(&mut self, _node: &u32, _style: &NodeStyle) {}

    fn set_height(&mut self, _node: &u32, _height: u32) {}

    fn mark_loaded(&mut self, _node: &u32) {}
}

#[derive(Default)]
struct Loads(Vec<LoadTicket>);

impl AssetLoader<u32> for Loads {
    fn begin_load(&mut self, _node: &u32, _url: &str, ticket: LoadTicket) {
        self.0.push(ticket);
    }
}

fn metrics(width: u32) -> ViewportMetrics {
    ViewportMetrics {
        window_width: width,
        window_height: 900,
        container_width: width,
        container_top: 0,
    }
}

fn main() {
    let resize = ResizeRegistry::shared();
    let mut host = Host::default();
    let mut c = Controller::initialize(
        Nodes::default(),
        Loads::default(),
        Some(0),
        (0..2_000).map(|i| ImageDescriptor::new(format!("img-{i}"), 1.0 + (i % 3) as f64 * 0.5)),
        GalleryOptions::default(),
        resize.clone(),
    )
    .expect("valid gallery");

    println!("enable: {:?}", c.enable(&mut host, metrics(1280), 0, 0));

    for step in 1..=40u64 {
        host.now_ms = step * 16;
        if step % 4 == 0 {
            c.on_scroll(step * 300, &mut host);
        }
        if step == 20 {
            resize.borrow_mut().notify(metrics(600), &mut host);
        }

        let timer_due = host.timer_at.is_some_and(|at| at <= host.now_ms);
        if host.frame_requested || timer_due {
            host.frame_requested = false;
            if timer_due {
                host.timer_at = None;
            }
            resize.borrow_mut().run_pending(host.now_ms);
            if let Some(pass) = c.on_frame(host.now_ms, &mut host) {
                println!("t={} {pass:?}", host.now_ms);
            }
        }

        let done: Vec<LoadTicket> = c.gallery_mut().loader_mut().0.drain(..).collect();
        for ticket in done {
            c.complete_load(ticket);
        }
    }

    for run in c.attachment_runs() {
        println!("{run}");
    }
    c.disable(&mut host);
}
