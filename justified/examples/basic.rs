// Example: pack a few images into justified rows.
use justified::{default_min_aspect_ratio, pack_rows};

fn main() {
    let ratios = [1.5, 0.67, 1.0, 1.78, 1.33, 0.75, 1.5, 2.4, 1.0];
    for window_width in [480u32, 1024, 1600] {
        let target = default_min_aspect_ratio(window_width);
        let layout = pack_rows(ratios.iter().copied(), window_width, target, 8, false);
        println!(
            "width={window_width} target={target} rows={} total_height={}",
            layout.rows.len(),
            layout.total_height
        );
        for row in &layout.rows {
            let rects = &layout.rects[row.clone()];
            let widths: Vec<u32> = rects.iter().map(|r| r.width).collect();
            println!(
                "  items {row:?} y={} h={} widths={widths:?}",
                rects[0].translate_y, rects[0].height
            );
        }
    }
}
