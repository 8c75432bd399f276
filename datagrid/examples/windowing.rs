// Example: compute mount sets for a scrolling grid with measured rows.
use datagrid::{RowExtents, WindowSpec, mount_indices, mount_indices_with};

fn main() -> Result<(), datagrid::GridError> {
    let mut extents = RowExtents::new(10_000, 24);

    // A few rows were measured taller than the estimate (wrapped text, expanded details).
    for (index, height) in [(3usize, 72u32), (4, 48), (250, 120)] {
        extents.set_height(index, height);
    }
    println!("total_size_px={}", extents.total_size());

    let viewport = 480;
    for scroll in [0u64, 6_000, 239_000] {
        let Some((start, end)) = extents.visible_span(scroll, viewport) else {
            continue;
        };
        let spec = WindowSpec::new(start, end, 3, extents.len());
        let mount = mount_indices(&spec)?;
        println!(
            "scroll={scroll} visible={start}..={end} mounted={} first={:?} last={:?}",
            mount.len(),
            mount.as_slice().first(),
            mount.as_slice().last()
        );
    }

    // Rows that must stay mounted regardless of scroll (pinned rows, the row being edited).
    let spec = WindowSpec::new(500, 519, 2, extents.len());
    let forced = [12usize, 9_999];
    let mount = mount_indices_with(&spec, &forced)?;
    println!("with_forced={:?}", mount.as_slice());

    Ok(())
}
