//! End-to-end router scenarios: pointer and keyboard input driving the
//! interaction state machine, the store, and undo.

#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]
mod tests {
    use std::cell::Cell as StdCell;
    use std::rc::Rc;

    use cellgrid::interaction::{CursorStyle, MouseMode};
    use cellgrid::render::{paint_frame, RecordingSurface};
    use cellgrid::types::{CellRef, CellRenderer, CellValue, HitArea, Sheet};
    use cellgrid::{GridState, KeyInput, PointerInput};

    // ================================================================
    // Test helpers
    // ================================================================

    /// Grid over a text sheet, with a viewport covering everything.
    fn grid_with(rows: &[&[&str]]) -> GridState {
        let mut state = GridState::new();
        state.attach(Sheet::from_text_rows(rows)).unwrap();
        state.set_viewport(2000.0, 2000.0);
        state
    }

    fn blank_grid(rows: usize, cols: usize) -> GridState {
        let mut state = GridState::new();
        state.attach(Sheet::blank(rows, cols)).unwrap();
        state.set_viewport(2000.0, 2000.0);
        state
    }

    /// Midpoint of a cell with default band sizes (80 × 24).
    fn cell_mid(row: usize, col: usize) -> (f64, f64) {
        (col as f64 * 80.0 + 40.0, row as f64 * 24.0 + 12.0)
    }

    fn click_cell(state: &mut GridState, row: usize, col: usize) {
        let (x, y) = cell_mid(row, col);
        let _ = state.pointer_down(&PointerInput::primary(x, y));
    }

    fn drag_select(state: &mut GridState, from: (usize, usize), to: (usize, usize)) {
        click_cell(state, from.0, from.1);
        let (x, y) = cell_mid(to.0, to.1);
        state.pointer_move(&PointerInput::drag(x, y));
        state.pointer_up();
    }

    fn cell_text(state: &GridState, row: usize, col: usize) -> String {
        state
            .store
            .sheet()
            .cell(CellRef::new(row, col))
            .unwrap()
            .display()
            .into_owned()
    }

    /// Paint once so the drag-fill handle's hit rect is registered.
    fn paint(state: &mut GridState) {
        let mut surface = RecordingSurface::new(2000.0, 2000.0);
        paint_frame(state, &mut surface);
    }

    fn hover_fill_handle(state: &mut GridState) {
        paint(state);
        let rect = state.interaction.drag_fill.handle_rect.unwrap();
        let (cx, cy) = (rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
        state.pointer_move(&PointerInput::motion(cx, cy));
        assert!(state.interaction.drag_fill.handle_hovered);
    }

    // ================================================================
    // Selection
    // ================================================================

    #[test]
    fn click_selects_a_single_cell() {
        let mut state = grid_with(&[&["a", "b"], &["c", "d"]]);
        click_cell(&mut state, 1, 1);

        assert_eq!(state.interaction.active_cell, Some(CellRef::new(1, 1)));
        let sel = state.interaction.selection.unwrap();
        assert_eq!(sel.start, CellRef::new(1, 1));
        assert_eq!(sel.end, CellRef::new(1, 1));
        assert_eq!(state.interaction.mode, MouseMode::SelectingCells);
        // Edit box seeded but disabled.
        assert!(state.interaction.edit_box.disabled);
        assert_eq!(state.interaction.edit_box.value, "d");
        assert_eq!(state.interaction.edit_box.left, 80.0);
        assert_eq!(state.interaction.edit_box.top, 24.0);
        assert_eq!(state.interaction.edit_box.width, 76.0);
    }

    #[test]
    fn focus_flag_follows_the_active_cell() {
        let mut state = grid_with(&[&["a", "b"]]);
        click_cell(&mut state, 0, 0);
        assert!(state.store.sheet().cell(CellRef::new(0, 0)).unwrap().is_focused);
        click_cell(&mut state, 0, 1);
        assert!(!state.store.sheet().cell(CellRef::new(0, 0)).unwrap().is_focused);
        assert!(state.store.sheet().cell(CellRef::new(0, 1)).unwrap().is_focused);
    }

    #[test]
    fn drag_extends_the_selection() {
        let mut state = blank_grid(4, 4);
        drag_select(&mut state, (0, 0), (2, 3));
        let sel = state.interaction.selection.unwrap();
        assert_eq!(sel.start, CellRef::new(0, 0));
        assert_eq!(sel.end, CellRef::new(2, 3));
        assert_eq!(state.interaction.mode, MouseMode::Default);
    }

    #[test]
    fn clicks_outside_the_matrix_are_ignored() {
        let mut state = blank_grid(2, 2);
        let _ = state.pointer_down(&PointerInput::primary(10_000.0, 10.0));
        assert!(state.interaction.selection.is_none());
        assert_eq!(state.interaction.mode, MouseMode::Default);
    }

    #[test]
    fn select_all_covers_the_grid() {
        let mut state = blank_grid(3, 5);
        click_cell(&mut state, 1, 1);
        let outcome = state.key_down(&KeyInput::ctrl("a"));
        assert!(outcome.suppress);
        let sel = state.interaction.selection.unwrap();
        assert_eq!(sel.start, CellRef::new(0, 0));
        assert_eq!(sel.end, CellRef::new(2, 4));
    }

    // ================================================================
    // Keyboard editing
    // ================================================================

    #[test]
    fn type_then_enter_commits_and_moves_down() {
        let mut state = blank_grid(3, 2);
        click_cell(&mut state, 0, 0);

        let outcome = state.key_down(&KeyInput::plain("7"));
        assert!(outcome.suppress);
        assert!(!state.interaction.edit_box.disabled);
        assert_eq!(state.interaction.edit_box.value, "7");
        assert!(state.interaction.edit_focus_requested);

        let outcome = state.key_down(&KeyInput::plain("Enter"));
        assert!(outcome.suppress);
        assert_eq!(cell_text(&state, 0, 0), "7");
        assert_eq!(state.interaction.active_cell, Some(CellRef::new(1, 0)));
        assert!(state.interaction.edit_box.disabled);
        assert_eq!(state.store.undo.len(), 1);
    }

    #[test]
    fn enter_on_the_last_row_stays_put() {
        let mut state = blank_grid(1, 1);
        click_cell(&mut state, 0, 0);
        state.key_down(&KeyInput::plain("x"));
        state.key_down(&KeyInput::plain("Enter"));
        assert_eq!(state.interaction.active_cell, Some(CellRef::new(0, 0)));
        assert!(state.interaction.edit_box.disabled);
        assert_eq!(cell_text(&state, 0, 0), "x");
    }

    #[test]
    fn committed_numbers_are_typed() {
        let mut state = blank_grid(2, 1);
        click_cell(&mut state, 0, 0);
        state.key_down(&KeyInput::plain("4"));
        state.interaction.edit_box.value = "42.5".to_string();
        state.key_down(&KeyInput::plain("Enter"));
        assert_eq!(
            state.store.sheet().cell(CellRef::new(0, 0)).unwrap().value,
            CellValue::Number(42.5)
        );
    }

    #[test]
    fn double_click_enables_editing() {
        let mut state = grid_with(&[&["a"]]);
        click_cell(&mut state, 0, 0);
        state.pointer_up();
        state.double_click(40.0, 12.0);
        assert!(!state.interaction.edit_box.disabled);
        assert!(state.interaction.edit_focus_requested);
    }

    #[test]
    fn printable_keys_are_inert_without_an_active_cell() {
        let mut state = blank_grid(2, 2);
        let outcome = state.key_down(&KeyInput::plain("x"));
        assert!(!outcome.suppress);
        assert!(state.interaction.edit_box.disabled);
    }

    // ================================================================
    // Arrow movement
    // ================================================================

    #[test]
    fn arrows_move_the_active_cell_and_reseed() {
        let mut state = grid_with(&[&["a", "b"], &["c", "d"]]);
        click_cell(&mut state, 0, 0);
        state.pointer_up();

        state.key_down(&KeyInput::plain("ArrowDown"));
        assert_eq!(state.interaction.active_cell, Some(CellRef::new(1, 0)));
        assert_eq!(state.interaction.edit_box.value, "c");

        state.key_down(&KeyInput::plain("ArrowRight"));
        assert_eq!(state.interaction.active_cell, Some(CellRef::new(1, 1)));
        assert_eq!(state.interaction.edit_box.value, "d");
    }

    #[test]
    fn arrows_clamp_at_the_grid_edge() {
        let mut state = blank_grid(2, 2);
        click_cell(&mut state, 0, 0);
        state.pointer_up();
        state.key_down(&KeyInput::plain("ArrowUp"));
        assert_eq!(state.interaction.active_cell, Some(CellRef::new(0, 0)));
        state.key_down(&KeyInput::plain("ArrowLeft"));
        assert_eq!(state.interaction.active_cell, Some(CellRef::new(0, 0)));
    }

    #[test]
    fn shift_arrows_extend_without_moving_the_active_cell() {
        let mut state = blank_grid(3, 3);
        click_cell(&mut state, 0, 0);
        state.pointer_up();

        state.key_down(&KeyInput::shifted("ArrowDown"));
        state.key_down(&KeyInput::shifted("ArrowRight"));
        let sel = state.interaction.selection.unwrap();
        assert_eq!(sel.start, CellRef::new(0, 0));
        assert_eq!(sel.end, CellRef::new(1, 1));
        assert_eq!(state.interaction.active_cell, Some(CellRef::new(0, 0)));
    }

    // ================================================================
    // Delete + undo
    // ================================================================

    #[test]
    fn delete_clears_each_selected_cell_with_its_own_snapshot() {
        let mut state = grid_with(&[&["a", "b"], &["c", "d"]]);
        drag_select(&mut state, (0, 0), (1, 1));

        let outcome = state.key_down(&KeyInput::plain("Delete"));
        assert!(outcome.suppress);
        for row in 0..2 {
            for col in 0..2 {
                assert_eq!(cell_text(&state, row, col), "");
            }
        }
        assert_eq!(state.store.undo.len(), 4);
    }

    #[test]
    fn delete_is_ignored_while_editing() {
        let mut state = grid_with(&[&["a"]]);
        click_cell(&mut state, 0, 0);
        state.key_down(&KeyInput::plain("x"));
        state.key_down(&KeyInput::plain("Delete"));
        assert_eq!(cell_text(&state, 0, 0), "a");
    }

    #[test]
    fn undo_restores_the_pre_mutation_values() {
        let mut state = grid_with(&[&["before"]]);
        click_cell(&mut state, 0, 0);
        state.key_down(&KeyInput::plain("n"));
        state.interaction.edit_box.value = "after".to_string();
        state.key_down(&KeyInput::plain("Enter"));
        assert_eq!(cell_text(&state, 0, 0), "after");

        state.key_down(&KeyInput::ctrl("z"));
        assert_eq!(cell_text(&state, 0, 0), "before");
        // One-directional: the restore itself pushed nothing.
        assert!(state.store.undo.is_empty());
    }

    #[test]
    fn undo_with_an_empty_stack_is_a_no_op() {
        let mut state = grid_with(&[&["a"]]);
        click_cell(&mut state, 0, 0);
        state.key_down(&KeyInput::ctrl("z"));
        assert_eq!(cell_text(&state, 0, 0), "a");
    }

    // ================================================================
    // Escape / marching ants
    // ================================================================

    #[test]
    fn escape_clears_the_copy_highlight() {
        let mut state = grid_with(&[&["a", "b"]]);
        drag_select(&mut state, (0, 0), (0, 1));
        let request = state.copy_request().unwrap();
        match request {
            cellgrid::ClipboardRequest::Copy { range, .. } => state.copy_succeeded(range),
            cellgrid::ClipboardRequest::Paste => panic!("expected a copy request"),
        }
        assert!(state.interaction.ants_visible);
        assert!(state.store.sheet().cell(CellRef::new(0, 1)).unwrap().is_highlighted);

        state.key_down(&KeyInput::plain("Escape"));
        assert!(!state.interaction.ants_visible);
        assert!(state.interaction.copy_range.is_none());
        assert!(!state.store.sheet().cell(CellRef::new(0, 1)).unwrap().is_highlighted);
    }

    // ================================================================
    // Column/row resize
    // ================================================================

    #[test]
    fn hot_zone_cursor_appears_near_a_column_edge() {
        let mut state = blank_grid(3, 3);
        state.pointer_move(&PointerInput::motion(82.0, 5.0));
        assert_eq!(state.interaction.cursor, CursorStyle::ColResize);
        // Dead center of a band: back to default.
        state.pointer_move(&PointerInput::motion(120.0, 5.0));
        assert_eq!(state.interaction.cursor, CursorStyle::Default);
    }

    #[test]
    fn column_resize_writes_the_size_live_and_commits_on_release() {
        let mut state = blank_grid(3, 3);
        state.pointer_move(&PointerInput::motion(82.0, 5.0));
        let _ = state.pointer_down(&PointerInput::primary(82.0, 5.0));
        assert_eq!(state.interaction.mode, MouseMode::ResizingColumn);

        state.pointer_move(&PointerInput::drag(1.0, 1.0).at_client(122.0, 5.0));
        assert_eq!(state.store.sheet().columns[0].width, 120.0);

        state.pointer_up();
        assert_eq!(state.interaction.mode, MouseMode::Default);
        assert!(state.interaction.resize.is_none());
        assert_eq!(state.store.sheet().columns[0].width, 120.0);
    }

    #[test]
    fn shrinking_below_the_floor_keeps_the_previous_size() {
        let mut state = blank_grid(3, 3);
        state.pointer_move(&PointerInput::motion(82.0, 5.0));
        let _ = state.pointer_down(&PointerInput::primary(82.0, 5.0));

        // 80 - 75 = 5: at or below the 10-unit floor, rejected.
        state.pointer_move(&PointerInput::drag(1.0, 1.0).at_client(7.0, 5.0));
        assert_eq!(state.store.sheet().columns[0].width, 80.0);

        // A legal size still applies afterwards.
        state.pointer_move(&PointerInput::drag(1.0, 1.0).at_client(62.0, 5.0));
        assert_eq!(state.store.sheet().columns[0].width, 60.0);
    }

    #[test]
    fn row_resize_grabs_from_the_left_header_band() {
        let mut state = blank_grid(3, 3);
        state.pointer_move(&PointerInput::motion(5.0, 47.0));
        assert_eq!(state.interaction.cursor, CursorStyle::RowResize);
        let _ = state.pointer_down(&PointerInput::primary(5.0, 47.0));
        assert_eq!(state.interaction.mode, MouseMode::ResizingRow);
        state.pointer_move(&PointerInput::drag(1.0, 1.0).at_client(5.0, 67.0));
        assert_eq!(state.store.sheet().rows[1].height, 44.0);
    }

    #[test]
    fn resizing_the_active_column_keeps_the_edit_box_in_step() {
        let mut state = blank_grid(3, 3);
        click_cell(&mut state, 1, 0);
        state.pointer_up();
        state.pointer_move(&PointerInput::motion(82.0, 5.0));
        let _ = state.pointer_down(&PointerInput::primary(82.0, 5.0));
        state.pointer_move(&PointerInput::drag(1.0, 1.0).at_client(182.0, 5.0));
        assert_eq!(state.interaction.edit_box.width, 180.0 - 4.0);
    }

    // ================================================================
    // Drag-fill
    // ================================================================

    #[test]
    fn drag_fill_replicates_the_source_downward() {
        let mut state = grid_with(&[&["7"], &[""], &[""], &[""]]);
        click_cell(&mut state, 0, 0);
        state.pointer_up();

        hover_fill_handle(&mut state);
        let _ = state.pointer_down(&PointerInput::primary(80.0, 24.0));
        assert_eq!(state.interaction.mode, MouseMode::DragFill);

        let (x, y) = cell_mid(3, 0);
        state.pointer_move(&PointerInput::drag(x, y));
        assert_eq!(
            state.interaction.drag_fill.preview.unwrap().end,
            CellRef::new(3, 0)
        );

        state.pointer_up();
        for row in 1..4 {
            assert_eq!(cell_text(&state, row, 0), "7");
        }
        // Selection covers the filled rectangle; transient cleared.
        let sel = state.interaction.selection.unwrap();
        assert_eq!(sel.end, CellRef::new(3, 0));
        assert!(!state.interaction.drag_fill.dragging);
        assert!(state.interaction.drag_fill.preview.is_none());
        assert_eq!(state.interaction.mode, MouseMode::Default);
    }

    #[test]
    fn degenerate_drag_fill_is_a_no_op() {
        let mut state = grid_with(&[&["7"], &[""]]);
        click_cell(&mut state, 0, 0);
        state.pointer_up();
        hover_fill_handle(&mut state);
        let _ = state.pointer_down(&PointerInput::primary(80.0, 24.0));
        state.pointer_up();
        assert_eq!(cell_text(&state, 1, 0), "");
        assert!(state.store.undo.is_empty());
    }

    #[test]
    fn double_click_on_the_handle_fills_to_the_last_row() {
        let mut state = grid_with(&[&["9", "x"], &["", ""], &["", ""], &["", ""]]);
        click_cell(&mut state, 0, 0);
        state.pointer_up();
        hover_fill_handle(&mut state);

        state.double_click(80.0, 24.0);
        for row in 1..4 {
            assert_eq!(cell_text(&state, row, 0), "9");
            assert_eq!(cell_text(&state, row, 1), "");
        }
        let sel = state.interaction.selection.unwrap();
        assert_eq!(sel.start, CellRef::new(0, 0));
        assert_eq!(sel.end, CellRef::new(3, 0));
    }

    #[test]
    fn auto_fill_at_the_last_row_is_a_no_op() {
        let mut state = grid_with(&[&["9"]]);
        click_cell(&mut state, 0, 0);
        state.pointer_up();
        hover_fill_handle(&mut state);
        state.double_click(80.0, 24.0);
        assert!(state.store.undo.is_empty());
    }

    // ================================================================
    // Custom-renderer hit areas
    // ================================================================

    #[test]
    fn hit_areas_take_priority_over_selection() {
        let mut state = blank_grid(2, 2);
        let clicked = Rc::new(StdCell::new(false));
        let flag = Rc::clone(&clicked);
        let renderer = CellRenderer::new(move |ctx, _surface| {
            let cb = Rc::clone(&flag);
            Some(
                HitArea::new(format!("probe:{},{}", ctx.row, ctx.col), ctx.rect)
                    .with_callback(Rc::new(move |_id| cb.set(true))),
            )
        });
        state
            .store
            .sheet_mut()
            .cell_mut(CellRef::new(0, 0))
            .unwrap()
            .renderer = Some(renderer);
        paint(&mut state);

        let hit = state.pointer_down(&PointerInput::primary(10.0, 10.0)).unwrap();
        assert_eq!(hit.id, "probe:0,0");
        // The router consumed the event before selection logic ran.
        assert!(state.interaction.selection.is_none());

        if let Some(cb) = &hit.on_click {
            cb(&hit.id);
        }
        assert!(clicked.get());
    }

    #[test]
    fn cells_without_hit_areas_still_select() {
        let mut state = blank_grid(2, 2);
        paint(&mut state);
        let hit = state.pointer_down(&PointerInput::primary(10.0, 10.0));
        assert!(hit.is_none());
        assert_eq!(state.interaction.active_cell, Some(CellRef::new(0, 0)));
    }

    // ================================================================
    // Context menu
    // ================================================================

    #[test]
    fn pointer_down_hides_the_context_menu() {
        let mut state = blank_grid(2, 2);
        state.context_menu_open(50.0, 60.0);
        assert!(state.interaction.context_menu.visible);
        assert_eq!(state.interaction.context_menu.x, 50.0);
        let _ = state.pointer_down(&PointerInput::primary(10.0, 10.0));
        assert!(!state.interaction.context_menu.visible);
    }

    // ================================================================
    // Attach contract
    // ================================================================

    #[test]
    fn attach_rejects_ragged_sheets() {
        let mut sheet = Sheet::blank(2, 2);
        sheet.cells[1].pop();
        let mut state = GridState::new();
        assert!(state.attach(sheet).is_err());
        assert!(!state.is_attached());
    }

    #[test]
    fn attach_stamps_positions_and_resets_interaction() {
        let mut state = grid_with(&[&["a"]]);
        click_cell(&mut state, 0, 0);
        state.attach(Sheet::blank(3, 3)).unwrap();
        assert!(state.interaction.selection.is_none());
        assert!(state.store.undo.is_empty());
        let cell = state.store.sheet().cell(CellRef::new(2, 1)).unwrap();
        assert_eq!((cell.row, cell.col), (2, 1));
        assert_eq!(state.content_size(), (240.0, 72.0));
    }

    #[test]
    fn scroll_moves_the_edit_box_with_the_cell() {
        let mut state = blank_grid(4, 4);
        click_cell(&mut state, 1, 1);
        assert_eq!(state.interaction.edit_box.left, 80.0);
        state.set_scroll(30.0, 10.0);
        assert_eq!(state.interaction.edit_box.left, 50.0);
        assert_eq!(state.interaction.edit_box.top, 14.0);
    }
}
