// Example: resolve sticky offsets for pinned columns and rows.
use datagrid::{Column, ColumnPin, PageMetrics, Row, RowPin, StickyOffsetResolver};

fn main() {
    let columns = [
        Column::pinned(1, 48, ColumnPin::Start), // checkbox
        Column::pinned(2, 160, ColumnPin::Start), // name
        Column::new(3, 240),
        Column::new(4, 240),
        Column::pinned(5, 96, ColumnPin::End), // actions
    ];
    let rows = [
        Row {
            index: 0,
            height: 32,
            pin: RowPin::Top,
        },
        Row {
            index: 999,
            height: 32,
            pin: RowPin::Bottom,
        },
    ];
    let mut metrics = PageMetrics {
        header_height: 56,
        notification_bar_height: 40,
        mobile_toolbar_height: 64,
        footer_height: 24,
        ..PageMetrics::default()
    };

    let mut resolver = StickyOffsetResolver::new();
    resolver.resolve(&columns, &rows, &metrics);
    print_map(&resolver);

    // Same inputs: nothing to recompute.
    let recomputed = resolver.resolve(&columns, &rows, &metrics);
    println!("recomputed_on_repeat={recomputed}");

    metrics.is_mobile = true;
    resolver.resolve(&columns, &rows, &metrics);
    print_map(&resolver);
}

fn print_map(resolver: &StickyOffsetResolver) {
    let map = resolver.map();
    println!("page top={} bottom={}", map.page.top, map.page.bottom);
    for c in &map.columns {
        println!("  column {} {:?} offset={}", c.id, c.edge, c.offset);
    }
    for r in &map.rows {
        println!("  row {} {:?} offset={}", r.id, r.edge, r.offset);
    }
}
