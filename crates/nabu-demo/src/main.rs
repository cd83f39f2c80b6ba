//! Scripted, headless session against the widget toolkit. Every step logs
//! what the widgets reported; run with `RUST_LOG=debug` to see the internals.

use std::time::Instant;

use anyhow::{ensure, Context, Result};
use nabu_engine::logging::{init_logging, LoggingConfig};
use nabu_engine::scene::DrawList;
use nabu_engine::text::{FixedMetrics, FontSystem, TextMeasure};
use nabu_ui::prelude::*;
use nabu_ui::signal::collect_into;
use nabu_ui::widgets::DEFAULT_COLOR_LIST;

const TRACKS: [(&str, &str, &str); 6] = [
    ("Nightcall", "Kavinsky", "4:18"),
    ("Midnight City", "M83", "4:03"),
    ("Oblivion", "Grimes", "4:11"),
    ("Digital Love", "Daft Punk", "5:01"),
    ("Tadow", "Masego", "5:00"),
    ("Genesis", "Justice", "3:54"),
];

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let theme = Theme::builtin();
    let text = text_measure();
    let ctx = LayoutCtx::new(text.as_ref(), &theme);

    playlist(&ctx)?;
    popup_menu(&ctx)?;
    color_button()?;

    log::info!("session finished");
    Ok(())
}

fn text_measure() -> Box<dyn TextMeasure> {
    let Some(bytes) = load_font() else {
        log::info!("no system font found; using fixed metrics");
        return Box::new(FixedMetrics::default());
    };
    let mut fonts = FontSystem::new();
    match fonts.load_font(&bytes) {
        Ok(_) => Box::new(fonts),
        Err(e) => {
            log::warn!("{e}; using fixed metrics");
            Box::new(FixedMetrics::default())
        }
    }
}

fn load_font() -> Option<Vec<u8>> {
    [
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/noto/NotoSans-Regular.ttf",
        "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    ]
    .iter()
    .find_map(|p| std::fs::read(p).ok())
}

// ── playlist ──────────────────────────────────────────────────────────────

fn press(pos: Vec2, modifiers: Modifiers) -> UiEvent {
    UiEvent::Press { pos, root: pos, button: MouseButton::Left, modifiers, clicks: 1 }
}

fn release(pos: Vec2) -> UiEvent {
    UiEvent::Release { pos, root: pos, button: MouseButton::Left, modifiers: Modifiers::NONE }
}

fn playlist(ctx: &LayoutCtx) -> Result<()> {
    let rect = Rect::new(0.0, 0.0, 320.0, 120.0);
    let scroll = ScrollArea::new(rect.width(), rect.height()).into_handle();
    let mut list = ListView::new(scroll, ListViewConfig::default());
    list.add_titles(ctx, ["Title", "Artist", "Length"], 24.0);
    list.add_items(ctx, TRACKS.iter().map(|(t, a, l)| TextRow::new([*t, *a, *l])), None, false);
    list.set_sorter(0, |a: &TextRow, b: &TextRow| a.cells[0].cmp(&b.cells[0]));
    list.size_allocate(rect.width());
    let events = collect_into(&list.events);

    let row_center = |list: &ListView<TextRow>, row: usize| {
        Vec2::new(20.0, list.header_height() + (row as f32 + 0.5) * list.row_height())
    };

    // Click the second track, shift-click the fourth.
    let first = row_center(&list, 1);
    list.on_event(&press(first, Modifiers::NONE), rect, ctx);
    list.on_event(&release(first), rect, ctx);
    let last = row_center(&list, 3);
    let shift = Modifiers { shift: true, ..Modifiers::NONE };
    list.on_event(&press(last, shift), rect, ctx);
    list.on_event(&release(last), rect, ctx);
    let selected: Vec<usize> = list.selection().rows().collect();
    log::info!("playlist: selected rows {selected:?}");
    ensure!(selected == [1, 2, 3], "shift-click should select rows 1..=3, got {selected:?}");

    list.on_event(&UiEvent::KeyPress { key: Key::Delete, modifiers: Modifiers::NONE }, rect, ctx);
    for event in events.borrow().iter() {
        if let ListViewEvent::RowsDeleted(rows) = event {
            let titles: Vec<&str> = rows.iter().filter_map(|r| r.cell(0)).collect();
            log::info!("playlist: deleted {titles:?}");
        }
    }
    ensure!(list.len() == 3, "three tracks should remain");

    // Sort by title through the header.
    let header = Vec2::new(5.0, list.header_height() / 2.0);
    list.on_event(&press(header, Modifiers::NONE), rect, ctx);
    list.on_event(&release(header), rect, ctx);
    let order: Vec<&str> = list.items().filter_map(|r| r.cell(0)).collect();
    log::info!("playlist: sorted {:?} by title: {order:?}", list.column_sort_type(0));

    let mut draw = DrawList::new();
    let mut painter = Painter::new(&mut draw, ctx.text, ctx.theme);
    list.paint(&mut painter, rect);
    log::info!("playlist: painted {} draw commands", draw.len());

    list.tick(Instant::now());
    Ok(())
}

// ── popup menu ────────────────────────────────────────────────────────────

fn popup_menu(ctx: &LayoutCtx) -> Result<()> {
    let screen = Vec2::new(1024.0, 768.0);
    let mut popups = PopupManager::new(Box::new(NullGrab::new()), screen);

    let root = Droplist::new(
        ctx,
        vec![
            DroplistItem::new("Sort by title", "sort"),
            DroplistItem::Separator,
            DroplistItem::new("View", "view"),
            DroplistItem::new("Quit", "quit"),
        ],
        DroplistConfig::default().max_width(160.0),
    );
    // Anchored near the right edge: the popup is pulled back on screen.
    let root = popups.open(root, Vec2::new(1000.0, 40.0), Vec2::zero());
    if let Some(list) = popups.get(root) {
        log::info!("menu: opened at ({}, {})", list.origin().x, list.origin().y);
    }

    let views = Droplist::new(
        ctx,
        vec![DroplistItem::new("Compact", "compact"), DroplistItem::new("Detailed", "detailed")],
        DroplistConfig::default(),
    );
    let sub = popups.open_submenu(root, 2, views).context("view sub-list did not open")?;
    let chosen = collect_into(&popups.get(sub).context("sub-list missing")?.events);
    log::info!("menu: {} popups open", popups.len());

    popups.dispatch(&UiEvent::KeyPress { key: Key::ArrowDown, modifiers: Modifiers::NONE });
    let outcome = popups.dispatch(&UiEvent::KeyPress { key: Key::Enter, modifiers: Modifiers::NONE });
    ensure!(outcome == Dispatch::Closed, "Return should close the chain");
    ensure!(!popups.is_open() && !popups.is_grabbed(), "chain and grab should be gone");

    for event in chosen.borrow().iter() {
        if let DroplistEvent::ItemSelected { label, value, .. } = event {
            log::info!("menu: picked {label} ({value})");
        }
    }
    Ok(())
}

// ── color button ──────────────────────────────────────────────────────────

fn color_button() -> Result<()> {
    let mut button = ColorButton::default();
    let events = collect_into(&button.events);
    ensure!(button.select_color(DEFAULT_COLOR_LIST[14]), "palette colors are valid");
    ensure!(!button.select_color("not a color"), "malformed colors are refused");
    log::info!("color button: {} ({} events)", button.color(), events.borrow().len());
    Ok(())
}
