//! The 200x120 "CRT status" badge.

pub mod canvas;
pub mod font;

use chrono::{NaiveDateTime, Timelike};
use image::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use canvas::{Align, Baseline, Canvas, Ink, Stroke};

pub const WIDTH: u32 = 200;
pub const HEIGHT: u32 = 120;

const BACKGROUND: Rgb<u8> = Rgb([0x02, 0x03, 0x14]);
const PHOSPHOR: Rgb<u8> = Rgb([0x39, 0xFF, 0x14]);
const PHOSPHOR_GLOW: Rgb<u8> = Rgb([0x10, 0x4A, 0x0C]);
const ALERT_RED: Rgb<u8> = Rgb([0xFF, 0x00, 0x00]);
const WHITE: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

/// Upper bound on scattered `vis` marks.
const MAX_MARKS: u64 = 320;
const SCATTER_MIN_Y: i32 = 20;
const SCATTER_MAX_Y: i32 = 100;

const SIGNATURE: &str = "power by 36000.eth";

/// How the centred `Me` label is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeStyle {
    /// Phosphor text knocked out of the background.
    Classic,
    /// White text on a red box.
    Alert,
}

impl BadgeStyle {
    const fn colors(self) -> (Rgb<u8>, Rgb<u8>) {
        match self {
            Self::Classic => (BACKGROUND, PHOSPHOR),
            Self::Alert => (ALERT_RED, WHITE),
        }
    }
}

/// Everything that varies between two renders.
#[derive(Debug, Clone)]
pub struct Screen {
    pub visits: u64,
    pub now: NaiveDateTime,
    pub badge: BadgeStyle,
    /// Seed for the mark scatter.
    pub seed: u64,
}

impl Screen {
    /// The prompt cursor blinks once per second, shown on even seconds.
    #[must_use]
    pub fn cursor_visible(&self) -> bool {
        self.now.second() % 2 == 0
    }

    fn draw(&self) -> Canvas {
        let mut canvas = Canvas::new(WIDTH, HEIGHT, BACKGROUND);
        let ink = Ink::glowing(PHOSPHOR, PHOSPHOR_GLOW);

        canvas.hline(15, Stroke::Solid, PHOSPHOR);
        canvas.hline(105, Stroke::Dashed { on: 3, off: 3 }, PHOSPHOR);

        let stamp = self.now.format("%m-%d %H:%M:%S").to_string();
        canvas.text(&stamp, 3, 2, Align::Left, Baseline::Top, 1, ink);
        canvas.text(
            &format!("visits: {}", self.visits),
            197,
            2,
            Align::Right,
            Baseline::Top,
            1,
            ink,
        );

        self.scatter_marks(&mut canvas, ink);
        self.draw_badge(&mut canvas);

        canvas.text(">", 3, 120, Align::Left, Baseline::Bottom, 1, ink);
        let prompt = if self.cursor_visible() {
            format!("{SIGNATURE}_")
        } else {
            SIGNATURE.to_string()
        };
        canvas.text(&prompt, 15, 119, Align::Left, Baseline::Bottom, 1, ink);

        canvas
    }

    fn scatter_marks(&self, canvas: &mut Canvas, ink: Ink) {
        let mut rng = StdRng::seed_from_u64(self.seed);
        let max_x = i32::try_from(WIDTH).unwrap_or(i32::MAX) + 1 - Canvas::text_width("vis", 1);

        for _ in 0..self.visits.min(MAX_MARKS) {
            let x = rng.gen_range(0..max_x);
            let y = rng.gen_range(SCATTER_MIN_Y..SCATTER_MAX_Y);
            canvas.text("vis", x, y, Align::Left, Baseline::Middle, 1, ink);
        }
    }

    fn draw_badge(&self, canvas: &mut Canvas) {
        let (center_x, center_y) = (100, 60);
        let (box_color, text_color) = self.badge.colors();
        let label_width = Canvas::text_width("Me", 2);

        canvas.fill_rect(
            center_x - label_width / 2 - 2,
            center_y - 7,
            label_width + 4,
            14,
            box_color,
        );
        canvas.text(
            "Me",
            center_x,
            center_y,
            Align::Center,
            Baseline::Middle,
            2,
            Ink::plain(text_color),
        );
    }
}

/// Render the badge and encode it as PNG.
///
/// # Errors
///
/// Returns an error if PNG encoding fails.
pub fn render_png(screen: &Screen) -> anyhow::Result<Vec<u8>> {
    let bytes = screen.draw().encode_png()?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .and_then(|d| d.and_hms_opt(21, 4, second))
            .unwrap_or_default()
    }

    fn screen(visits: u64, badge: BadgeStyle) -> Screen {
        Screen {
            visits,
            now: at(8),
            badge,
            seed: 7,
        }
    }

    #[test]
    fn test_cursor_blinks_on_even_seconds() {
        assert!(screen(1, BadgeStyle::Classic).cursor_visible());
        let odd = Screen { now: at(9), ..screen(1, BadgeStyle::Classic) };
        assert!(!odd.cursor_visible());
    }

    #[test]
    fn test_frame_lines() {
        let canvas = screen(0, BadgeStyle::Classic).draw();
        let img = canvas.image();

        assert_eq!(img.dimensions(), (WIDTH, HEIGHT));
        assert_eq!(*img.get_pixel(199, 15), PHOSPHOR);
        assert_eq!(*img.get_pixel(1, 105), PHOSPHOR);
        assert_ne!(*img.get_pixel(4, 105), PHOSPHOR);
    }

    #[test]
    fn test_alert_badge_uses_red_box() {
        let alert = screen(0, BadgeStyle::Alert).draw();
        let classic = screen(0, BadgeStyle::Classic).draw();

        // Top-left corner of the box around the label.
        assert_eq!(*alert.image().get_pixel(86, 53), ALERT_RED);
        assert_eq!(*classic.image().get_pixel(86, 53), BACKGROUND);
    }

    #[test]
    fn test_same_seed_renders_identically() {
        let a = render_png(&screen(42, BadgeStyle::Classic)).unwrap_or_default();
        let b = render_png(&screen(42, BadgeStyle::Classic)).unwrap_or_default();
        assert!(!a.is_empty());
        assert_eq!(a, b);
    }

    #[test]
    fn test_visit_count_changes_output() {
        let few = render_png(&screen(1, BadgeStyle::Classic)).unwrap_or_default();
        let many = render_png(&screen(500, BadgeStyle::Classic)).unwrap_or_default();
        assert_ne!(few, many);
    }
}
