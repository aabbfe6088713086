//! Composition of the greeting: parallax backdrop, particle surface, roses,
//! title, call to action and the letter modal.

use std::f32::consts::PI;
use std::time::Duration;

use amour_art::{ROSE_HEIGHT, ROSE_WIDTH, RoseStage, garland, heart_glyph, rose};
use amour_config::GreetingConfig;
use amour_core::{CellSize, Rgba, Viewport, hsl_to_rgb};
use amour_particles::{HalfBlockView, Surface};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget, Wrap},
};

use crate::modal::{ModalController, ModalHeart};
use crate::reveal::{RevealSnapshot, Rose};

const ROSE_PETAL: Rgba = Rgba::rgb(255, 92, 138);
const ROSE_STEM: Rgba = Rgba::rgb(86, 160, 110);
const TITLE: Rgba = Rgba::rgb(255, 214, 226);
const SUBTITLE: Rgba = Rgba::rgb(214, 160, 182);
const CTA: Rgba = Rgba::rgb(255, 122, 168);
const MODAL_BG: Rgba = Rgba::rgb(42, 16, 30);
const MODAL_BORDER: Rgba = Rgba::rgb(255, 170, 200);
const LETTER_TEXT: Rgba = Rgba::rgb(250, 230, 236);
const MODAL_HEART: Rgba = Rgba::rgb(255, 122, 168);

/// Brightness kept by the page behind the open modal.
const OVERLAY_DIM: f32 = 0.45;

/// Length of one float-up cycle of a modal heart.
const HEART_FLOAT_PERIOD: Duration = Duration::from_millis(3200);

/// Share of the modal height a heart rises in one cycle.
const HEART_FLOAT_RISE: f32 = 0.9;

/// Widest the letter modal gets, in columns.
const MODAL_MAX_WIDTH: u16 = 64;

/// Tallest the letter modal gets, in rows.
const MODAL_MAX_HEIGHT: u16 = 18;

/// Background layer color at logical (`x`, `y`), translated by `offset`.
///
/// A deep rose vertical gradient with a soft glow behind the title.
pub fn backdrop(x: f32, y: f32, viewport: Viewport, offset: (f32, f32)) -> Rgba {
    let x = x - offset.0;
    let y = y - offset.1;
    let width = viewport.width.max(1.0);
    let height = viewport.height.max(1.0);

    let top = hsl_to_rgb(335.0, 0.45, 0.07);
    let bottom = hsl_to_rgb(345.0, 0.55, 0.17);
    let base = top.lerp(bottom, y / height);

    let dx = (x - width * 0.5) / width;
    let dy = (y - height * 0.42) / height;
    let glow = (1.0 - (dx * dx + dy * dy).sqrt() * 2.2).clamp(0.0, 1.0).powi(2) * 0.35;
    hsl_to_rgb(340.0, 0.6, 0.3).with_alpha(glow).over(base)
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    CloseButton,
    ModalContent,
    Backdrop,
    Cta,
    Nothing,
}

/// Screen regions of the scene for a given terminal area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneLayout {
    pub title: Rect,
    pub subtitle: Rect,
    pub cta: Rect,
    pub rose_left: Rect,
    pub rose_right: Rect,
    pub garland: Rect,
    pub help: Rect,
    pub modal: Rect,
    pub close_button: Rect,
}

impl SceneLayout {
    pub fn new(area: Rect, greeting: &GreetingConfig) -> Self {
        let row = |offset: u16| area.y + offset.min(area.height.saturating_sub(1));
        let middle = area.height / 2;

        let title = Rect::new(area.x, row(middle.saturating_sub(4)), area.width, 1);
        let subtitle = Rect::new(area.x, row(middle.saturating_sub(2)), area.width, 1);

        let cta_width = (cta_text(&greeting.cta_label).chars().count() as u16).min(area.width);
        let cta = Rect::new(
            area.x + (area.width - cta_width) / 2,
            row(middle + 1),
            cta_width,
            1,
        );

        let help = Rect::new(area.x, row(area.height.saturating_sub(1)), area.width, 1);
        let garland = Rect::new(area.x, row(area.height.saturating_sub(2)), area.width, 1);
        let rose_top = area.height.saturating_sub(2 + ROSE_HEIGHT);
        let rose_left = Rect::new(area.x + 1, row(rose_top), ROSE_WIDTH, ROSE_HEIGHT)
            .intersection(area);
        let rose_right = Rect::new(
            (area.right().saturating_sub(ROSE_WIDTH + 1)).max(area.x),
            row(rose_top),
            ROSE_WIDTH,
            ROSE_HEIGHT,
        )
        .intersection(area);

        let modal_width = area.width.saturating_sub(4).min(MODAL_MAX_WIDTH);
        let modal_height = area.height.saturating_sub(2).min(MODAL_MAX_HEIGHT);
        let modal = Rect::new(
            area.x + (area.width - modal_width) / 2,
            area.y + (area.height - modal_height) / 2,
            modal_width,
            modal_height,
        );
        let close_button = Rect::new(modal.right().saturating_sub(5).max(modal.x), modal.y, 3, 1)
            .intersection(modal);

        Self {
            title,
            subtitle,
            cta,
            rose_left,
            rose_right,
            garland,
            help,
            modal,
            close_button,
        }
    }

    /// Resolve a click at `position`.
    pub fn hit(&self, position: Position, modal_open: bool) -> Hit {
        if modal_open {
            if self.close_button.contains(position) {
                Hit::CloseButton
            } else if self.modal.contains(position) {
                Hit::ModalContent
            } else {
                Hit::Backdrop
            }
        } else if self.cta.contains(position) {
            Hit::Cta
        } else {
            Hit::Nothing
        }
    }
}

fn cta_text(label: &str) -> String {
    format!("[ ♥ {label} ♥ ]")
}

/// One frame of the greeting.
pub struct Scene<'a> {
    pub surface: &'a Surface,
    pub cell: CellSize,
    pub viewport: Viewport,
    pub parallax: (f32, f32),
    pub reveal: RevealSnapshot,
    pub modal: &'a ModalController,
    /// Time since the modal last opened.
    pub since_open: Duration,
    pub greeting: &'a GreetingConfig,
    /// Date printed under the signature.
    pub date: String,
}

impl Widget for Scene<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = SceneLayout::new(area, self.greeting);
        let viewport = self.viewport;
        let parallax = self.parallax;

        HalfBlockView::new(self.surface, self.cell, |x, y| {
            backdrop(x, y, viewport, parallax)
        })
        .render(area, buf);

        self.render_roses(&layout, area, buf);
        put_centered(buf, layout.title, &self.greeting.title, Ink::new(TITLE, 1.0).bold(true));
        put_centered(buf, layout.subtitle, &self.greeting.subtitle, Ink::new(SUBTITLE, 1.0));
        self.render_cta(&layout, area, buf);
        self.render_help(&layout, buf);

        if self.modal.is_overlay_shown() {
            dim(area, buf);
        }
        if self.modal.is_modal_shown() {
            self.render_modal(&layout, buf);
        }
    }
}

impl Scene<'_> {
    fn render_roses(&self, layout: &SceneLayout, area: Rect, buf: &mut Buffer) {
        for (side, rect, mirrored) in [
            (Rose::Left, layout.rose_left, false),
            (Rose::Right, layout.rose_right, true),
        ] {
            let state = self.reveal.rose(side);
            let stage = if state.bloomed {
                RoseStage::Bloom
            } else {
                RoseStage::Bud
            };
            let art = rose(stage, mirrored);
            let shift = self.cell.rows_for(state.visual.offset_y);
            let inset = ((1.0 - state.visual.scale) * ROSE_WIDTH as f32 / 2.0).round() as u16;
            let x = if mirrored { rect.x + inset } else { rect.x.saturating_sub(inset) };

            let rows = art
                .petals
                .iter()
                .map(|line| (line, ROSE_PETAL))
                .chain(art.stem.iter().map(|line| (line, ROSE_STEM)));
            for (i, (line, color)) in rows.enumerate() {
                let y = rect.y as i32 + i as i32 + shift;
                if y < area.y as i32 || y >= area.bottom() as i32 {
                    continue;
                }
                put_str(buf, x, y as u16, line, Ink::new(color, state.visual.opacity), false);
            }
        }

        let bottom = self.reveal.rose(Rose::Bottom);
        let stage = if bottom.bloomed {
            RoseStage::Bloom
        } else {
            RoseStage::Bud
        };
        let y = layout.garland.y as i32 + self.cell.rows_for(bottom.visual.offset_y);
        if y < area.bottom() as i32 {
            let line = garland(layout.garland.width as usize, stage);
            let ink = Ink::new(ROSE_PETAL, bottom.visual.opacity);
            put_str(buf, layout.garland.x, y as u16, &line, ink, false);
        }
    }

    fn render_cta(&self, layout: &SceneLayout, area: Rect, buf: &mut Buffer) {
        let cta = self.reveal.cta;
        let y = layout.cta.y as i32 + self.cell.rows_for(cta.visual.offset_y);
        if y >= area.bottom() as i32 {
            return;
        }
        let text = cta_text(&self.greeting.cta_label);
        let ink = Ink::new(CTA, cta.visual.opacity).bold(cta.interactive);
        put_str(buf, layout.cta.x, y as u16, &text, ink, true);
    }

    fn render_help(&self, layout: &SceneLayout, buf: &mut Buffer) {
        let key = Style::new()
            .fg(CTA.to_color())
            .add_modifier(Modifier::BOLD);
        let text = Style::new().fg(Color::DarkGray);
        let mut spans = vec![Span::styled("q", key), Span::styled(" quit  ", text)];
        if self.modal.is_open() {
            spans.push(Span::styled("esc", key));
            spans.push(Span::styled(" close letter", text));
        } else if self.reveal.cta.interactive {
            spans.push(Span::styled("enter", key));
            spans.push(Span::styled(" open letter", text));
        }
        Line::from(spans).centered().render(layout.help, buf);
    }

    fn render_modal(&self, layout: &SceneLayout, buf: &mut Buffer) {
        let modal = layout.modal;
        let background = Style::new().bg(MODAL_BG.to_color());
        for y in modal.top()..modal.bottom() {
            for x in modal.left()..modal.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.reset();
                    cell.set_style(background);
                }
            }
        }

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(MODAL_BORDER.to_color()))
            .title(" a letter for you ")
            .style(background);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let text_style = Style::new().fg(LETTER_TEXT.to_color());
        let mut lines = vec![
            Line::styled(
                format!("Dear {},", self.greeting.recipient),
                text_style.add_modifier(Modifier::BOLD),
            ),
            Line::default(),
        ];
        for paragraph in &self.greeting.letter {
            lines.push(Line::styled(paragraph.as_str(), text_style));
            lines.push(Line::default());
        }
        lines.push(Line::styled(self.greeting.signature.as_str(), text_style).right_aligned());
        lines.push(
            Line::styled(self.date.as_str(), Style::new().fg(SUBTITLE.to_color())).right_aligned(),
        );

        let letter_area = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .alignment(Alignment::Left)
            .style(background)
            .render(letter_area, buf);

        for heart in self.modal.hearts() {
            if let Some((x, y, opacity)) = float_heart(heart, inner, self.cell, self.since_open) {
                let glyph = heart_glyph(heart.scale).to_string();
                put_str(buf, x, y, &glyph, Ink::new(MODAL_HEART, opacity), false);
            }
        }

        Paragraph::new("[✕]")
            .style(Style::new().fg(MODAL_BORDER.to_color()).bg(MODAL_BG.to_color()))
            .render(layout.close_button, buf);
    }
}

/// Cell and opacity of a modal heart `since_open` after the modal opened,
/// or `None` while it waits for its delay or has floated out of `inner`.
fn float_heart(
    heart: &ModalHeart,
    inner: Rect,
    cell: CellSize,
    since_open: Duration,
) -> Option<(u16, u16, f32)> {
    let running = since_open.checked_sub(heart.delay)?;
    let period = HEART_FLOAT_PERIOD.as_secs_f32();
    let t = (running.as_secs_f32() % period) / period;

    let width_px = inner.width as f32 * cell.width;
    let height_px = inner.height as f32 * cell.height;
    let x_px = width_px * heart.left_percent / 100.0 + heart.drift_px * t;
    let rise_px = heart.bottom_px + t * height_px * HEART_FLOAT_RISE;

    let col = (x_px / cell.width).floor();
    let rows_up = (rise_px / cell.height).floor().max(0.0);
    if col < 0.0 || col >= inner.width as f32 || rows_up >= inner.height as f32 {
        return None;
    }

    let x = inner.x + col as u16;
    let y = inner.bottom() - 1 - rows_up as u16;
    let opacity = heart.opacity.max((PI * t).sin());
    Some((x, y, opacity))
}

/// Current background of a cell as a color to blend text against.
fn cell_background(buf: &Buffer, x: u16, y: u16) -> Rgba {
    match buf.cell((x, y)).map(|cell| cell.bg) {
        Some(Color::Rgb(r, g, b)) => Rgba::rgb(r, g, b),
        _ => Rgba::rgb(0, 0, 0),
    }
}

/// Color, fade and weight for text written into the buffer.
#[derive(Debug, Clone, Copy)]
struct Ink {
    color: Rgba,
    opacity: f32,
    bold: bool,
}

impl Ink {
    fn new(color: Rgba, opacity: f32) -> Self {
        Self {
            color,
            opacity,
            bold: false,
        }
    }

    fn bold(self, bold: bool) -> Self {
        Self { bold, ..self }
    }
}

/// Write `text` at (`x`, `y`) faded over whatever is behind it. With
/// `clear_spaces` unset, spaces leave the cell untouched so art blends into
/// the particle field.
fn put_str(buf: &mut Buffer, x: u16, y: u16, text: &str, ink: Ink, clear_spaces: bool) {
    if ink.opacity <= 0.01 {
        return;
    }
    let area = buf.area;
    for (i, ch) in text.chars().enumerate() {
        let cx = x.saturating_add(i as u16);
        if cx >= area.right() || y >= area.bottom() || (ch == ' ' && !clear_spaces) {
            continue;
        }
        let behind = cell_background(buf, cx, y);
        let fg = ink
            .color
            .with_alpha(ink.opacity.clamp(0.0, 1.0))
            .over(behind)
            .to_color();
        if let Some(cell) = buf.cell_mut((cx, y)) {
            cell.set_char(ch).set_fg(fg);
            if ink.bold {
                cell.modifier.insert(Modifier::BOLD);
            } else {
                cell.modifier.remove(Modifier::BOLD);
            }
        }
    }
}

fn put_centered(buf: &mut Buffer, rect: Rect, text: &str, ink: Ink) {
    let width = (text.chars().count() as u16).min(rect.width);
    let x = rect.x + (rect.width - width) / 2;
    put_str(buf, x, rect.y, text, ink, true);
}

/// Darken every cell behind the modal.
fn dim(area: Rect, buf: &mut Buffer) {
    let darken = |color: Color| match color {
        Color::Rgb(r, g, b) => {
            let scale = |c: u8| (c as f32 * OVERLAY_DIM).round() as u8;
            Color::Rgb(scale(r), scale(g), scale(b))
        }
        other => other,
    };
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell_mut((x, y)) {
                let (fg, bg) = (darken(cell.fg), darken(cell.bg));
                cell.set_fg(fg).set_bg(bg);
            }
        }
    }
}
