use datagrid::{CellRef, Column, ColumnPin, CommitRejected, SelectionMode};
use datagrid_adapter::{
    CollectionSnapshot, GeometryEvent, GridCoordinator, GridOptions, InputEffect, InputEvent,
    KeyCode, Modifiers,
};

fn main() -> Result<(), datagrid::GridError> {
    // Example: an adapter-side event loop without any UI objects.
    //
    // A real adapter would:
    // - forward resize/measure callbacks as geometry events
    // - forward clicks and key presses as input events
    // - act on the returned effects (scroll into view, open an editor, call the backend)
    // - render from the snapshot
    let mut grid: GridCoordinator<u32, String> = GridCoordinator::new(
        GridOptions::new(28)
            .with_overscan(4)
            .with_selection_mode(SelectionMode::Multi)
            .with_columns([
                Column::pinned(1, 180, ColumnPin::Start),
                Column::new(2, 320),
            ]),
    );
    grid.replace_collection(CollectionSnapshot::new(1..=5_000u32, 1));
    grid.on_geometry(GeometryEvent::ContainerSize {
        width: 1280,
        height: 560,
    });

    let events = [
        InputEvent::PointerClick {
            key: 10,
            modifiers: Modifiers::NONE,
        },
        InputEvent::PointerClick {
            key: 14,
            modifiers: Modifiers::SHIFT,
        },
        InputEvent::KeyPress {
            code: KeyCode::PageDown,
            modifiers: Modifiers::NONE,
        },
        InputEvent::KeyPress {
            code: KeyCode::Enter,
            modifiers: Modifiers::NONE,
        },
    ];

    for event in events {
        match grid.on_input(event) {
            InputEffect::FocusMoved(key) => {
                if let Some(offset) = grid.reveal_offset(&key) {
                    grid.on_scroll(offset);
                }
                println!("focus={key} scroll={}", grid.scroll_offset());
            }
            InputEffect::EditRequested(key) => {
                grid.start_edit(CellRef::new(key, 2), format!("row {key}"))?;
                println!("editing row {key}");
            }
            effect => println!("{effect:?}"),
        }
    }

    grid.set_pending_value(String::new())?;
    if let InputEffect::Commit(pending) = grid.key_press(KeyCode::Enter, Modifiers::NONE) {
        // The backend refuses empty values.
        let outcome = if pending.value.is_empty() {
            Err(CommitRejected::new("value must not be empty"))
        } else {
            Ok(())
        };
        let resolution = grid.resolve_commit(pending.ticket, outcome)?;
        println!("resolution={resolution:?} error={:?}", grid.edit().error());
    }

    grid.set_pending_value("renamed".to_string())?;
    let resolution = grid.commit_with(|cell, value| {
        println!("persist {cell:?} = {value}");
        Ok(())
    })?;
    println!("resolution={resolution:?}");

    let snap = grid.snapshot()?;
    println!(
        "mounted={} selected={} focus={:?} phase={}",
        snap.mount.len(),
        snap.selection.selected_keys.len(),
        snap.selection.last_focused_key,
        snap.edit.phase
    );

    Ok(())
}
