// Example: drive a gallery with a printing display tree and simulated scrolling.
use justified::{
    AssetLoader, DisplayTree, Gallery, GalleryOptions, ImageDescriptor, LoadTicket, NodeKind,
    NodeStyle, ViewportMetrics,
};

#[derive(Default)]
struct PrintTree {
    next: u32,
    mutations: usize,
}

impl DisplayTree for PrintTree {
    type Node = u32;

    fn create_node(&mut self, _kind: NodeKind) -> u32 {
        self.next += 1;
        self.next
    }

    fn append_child(&mut self, _parent: &u32, _child: &u32) {
        self.mutations += 1;
    }

    fn insert_before(&mut self, _parent: &u32, _child: &u32, _reference: &u32) {
        self.mutations += 1;
    }

    fn remove_child(&mut self, _parent: &u32, _child: &u32) {
        self.mutations += 1;
    }

    fn set_style(&mut self, _node: &u32, _style: &NodeStyle) {}

    fn set_height(&mut self, _node: &u32, height: u32) {
        println!("container height = {height}px");
    }

    fn mark_loaded(&mut self, _node: &u32) {}
}

#[derive(Default)]
struct QueueLoader {
    pending: Vec<LoadTicket>,
}

impl AssetLoader<u32> for QueueLoader {
    fn begin_load(&mut self, _node: &u32, _url: &str, ticket: LoadTicket) {
        self.pending.push(ticket);
    }
}

fn main() {
    let images = (0..5_000)
        .map(|i| ImageDescriptor::new(format!("photo-{i}.jpg"), 0.5 + (i % 7) as f64 * 0.25));
    let mut g = Gallery::initialize(
        PrintTree::default(),
        QueueLoader::default(),
        Some(0),
        images,
        GalleryOptions::default(),
    )
    .expect("valid gallery");

    let metrics = ViewportMetrics {
        window_width: 1440,
        window_height: 900,
        container_width: 1400,
        container_top: 120,
    };
    g.relayout(metrics, 0);

    let mut now = 0u64;
    for offset in [0u64, 2_000, 8_000, 20_000, 19_000, 4_000] {
        now += 250;
        g.set_scroll_offset(offset);
        let pass = g.update_visibility(now);
        let started = g.tick(now + 100);

        // Pretend every requested asset arrives immediately.
        let done: Vec<LoadTicket> = g.loader_mut().pending.drain(..).collect();
        let completed = done.into_iter().filter(|t| g.complete_load(*t)).count();

        println!(
            "offset={offset} dir={:?} {pass:?} loads_started={started} completed={completed}",
            g.scroll_direction()
        );
    }

    for run in g.attachment_runs() {
        println!("{run}");
    }
    println!("display mutations: {}", g.tree().mutations);
}
