use std::fmt;
use std::path::Path;

use crate::cli::HELP_KEYS;
use crate::loader::{decode_image, DecodedImage};
use crate::navigator::Navigator;
use crate::ui::render::{fit_scale, Frame, Rgba, BG_COLOR, WHITE};

const TEXT_SCALE: u32 = 2;
const ERROR_COLOR: Rgba = (255, 80, 80, 255);

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Next,
    Previous,
    ToggleInfo,
    ToggleHelp,
    Quit,
}

// ---------------------------------------------------------------------------
// Display region
// ---------------------------------------------------------------------------

/// Text shown in place of an image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// The directory held no images.
    NoImages,
    /// The named file could not be decoded.
    Unreadable(String),
}

impl Placeholder {
    fn color(&self) -> Rgba {
        match self {
            Placeholder::NoImages => WHITE,
            Placeholder::Unreadable(_) => ERROR_COLOR,
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placeholder::NoImages => f.write_str("No images found."),
            Placeholder::Unreadable(name) => write!(f, "Could not load: {}", name),
        }
    }
}

/// Where decoded images end up. Showing a new image or a placeholder
/// releases whatever was shown before.
pub trait ImageRegion {
    fn set_image(&mut self, image: DecodedImage);
    fn set_placeholder_text(&mut self, placeholder: Placeholder);
}

/// The window's image area. Owns the decoded image for as long as it is on
/// screen.
#[derive(Debug, Default)]
pub struct Canvas {
    image: Option<DecodedImage>,
    placeholder: Option<Placeholder>,
}

impl Canvas {
    pub fn image(&self) -> Option<&DecodedImage> {
        self.image.as_ref()
    }

    pub fn placeholder(&self) -> Option<&Placeholder> {
        self.placeholder.as_ref()
    }

    pub fn draw(&self, frame: &mut Frame) {
        frame.clear(BG_COLOR);

        if let Some(ref dec) = self.image {
            let sw = frame.width as f32;
            let sh = frame.height as f32;
            let scale = fit_scale(dec.width as f32, dec.height as f32, sw, sh);
            let x0 = (sw - dec.width as f32 * scale) / 2.0;
            let y0 = (sh - dec.height as f32 * scale) / 2.0;
            frame.blit_scaled(&dec.rgba_bytes, dec.width, dec.height, x0, y0, scale);
        }

        if let Some(placeholder) = self.placeholder() {
            frame.draw_text_centered(&placeholder.to_string(), TEXT_SCALE, placeholder.color());
        }
    }
}

impl ImageRegion for Canvas {
    fn set_image(&mut self, image: DecodedImage) {
        self.placeholder = None;
        self.image = Some(image);
    }

    fn set_placeholder_text(&mut self, placeholder: Placeholder) {
        self.image = None;
        self.placeholder = Some(placeholder);
    }
}

// ---------------------------------------------------------------------------
// Viewer state
// ---------------------------------------------------------------------------

pub struct ViewerState<R: ImageRegion> {
    pub navigator: Navigator,
    pub region: R,
    pub show_info: bool,
    pub show_help: bool,
}

impl<R: ImageRegion> ViewerState<R> {
    pub fn new(navigator: Navigator, region: R) -> Self {
        Self {
            navigator,
            region,
            show_info: false,
            show_help: false,
        }
    }

    /// Put whatever the cursor points at into the region.
    pub fn show_current(&mut self) {
        match self.navigator.current() {
            Some(path) => self.show(&path),
            None => self.region.set_placeholder_text(Placeholder::NoImages),
        }
    }

    fn show(&mut self, path: &Path) {
        log::info!("Showing {}", path.display());
        // Decode fully before handing over, so the old image stays up until
        // the new one is ready.
        match decode_image(path) {
            Ok(img) => self.region.set_image(img),
            Err(e) => {
                log::warn!("{}", e);
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.region.set_placeholder_text(Placeholder::Unreadable(name));
            }
        }
    }

    /// Apply one input event. Returns true if the app should quit.
    pub fn handle(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Next | InputEvent::Previous => {
                let from = self.navigator.position();
                let target = if event == InputEvent::Next {
                    self.navigator.advance()
                } else {
                    self.navigator.retreat()
                };
                if let Some(path) = target {
                    log::debug!("[nav] {:?} -> {:?}", from, self.navigator.position());
                    self.show(&path);
                }
            }
            InputEvent::ToggleInfo => self.show_info = !self.show_info,
            InputEvent::ToggleHelp => self.show_help = !self.show_help,
            InputEvent::Quit => return true,
        }
        false
    }

    /// Window title for the current position, e.g. `Viewer - cam1.png (3/20)`.
    pub fn title(&self, base: &str) -> String {
        match (self.navigator.current_name(), self.navigator.position()) {
            (Some(name), Some(i)) => {
                format!("{} - {} ({}/{})", base, name, i + 1, self.navigator.len())
            }
            _ => base.to_string(),
        }
    }
}

impl ViewerState<Canvas> {
    pub fn render(&self, frame: &mut Frame) {
        self.region.draw(frame);

        if self.show_info {
            if let Some(dec) = self.region.image() {
                self.draw_info(frame, dec);
            }
        }

        if self.show_help {
            frame.fill_rect(0, 0, frame.width, frame.height, (0, 0, 0, 200));
            let mut y = 20;
            for line in HELP_KEYS.lines() {
                frame.draw_text(line, 20, y, TEXT_SCALE, WHITE);
                y += 24;
            }
        }
    }

    fn draw_info(&self, frame: &mut Frame, dec: &DecodedImage) {
        let position = self.navigator.position().map_or(0, |i| i + 1);
        let lines = [
            format!("[{}/{}]", position, self.navigator.len()),
            self.navigator.current_name().unwrap_or_default().to_string(),
            format!(
                "{}x{} | {} | {:.1} KB",
                dec.width,
                dec.height,
                dec.format_name,
                dec.file_size as f64 / 1024.0,
            ),
            dec.captured.clone().unwrap_or_default(),
        ];

        let line_h = (7 * TEXT_SCALE + 4) as i32;
        let bar_h = (line_h * lines.len() as i32 + 8) as u32;
        frame.fill_rect(0, 0, frame.width, bar_h, (0, 0, 0, 178));
        for (i, line) in lines.iter().enumerate() {
            frame.draw_text(line, 10, 4 + line_h * i as i32, TEXT_SCALE, WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::files::AllowSet;
    use image::{Rgba, RgbaImage};
    use std::fs;
    use tempfile::{tempdir, TempDir};

    #[derive(Debug, PartialEq)]
    enum Shown {
        Image(u32),
        Placeholder(Placeholder),
    }

    #[derive(Default)]
    struct Recorder {
        shown: Vec<Shown>,
    }

    impl ImageRegion for Recorder {
        fn set_image(&mut self, image: DecodedImage) {
            self.shown.push(Shown::Image(image.width));
        }

        fn set_placeholder_text(&mut self, placeholder: Placeholder) {
            self.shown.push(Shown::Placeholder(placeholder));
        }
    }

    /// Each image is `width` pixels wide so the recorder can tell them apart.
    fn gallery(images: &[(&str, u32)]) -> TempDir {
        let dir = tempdir().unwrap();
        for (name, width) in images {
            RgbaImage::from_pixel(*width, 1, Rgba([0, 0, 0, 255]))
                .save(dir.path().join(name))
                .unwrap();
        }
        dir
    }

    fn viewer(dir: &TempDir) -> ViewerState<Recorder> {
        let nav = Navigator::build(dir.path(), &AllowSet::basic()).unwrap();
        ViewerState::new(nav, Recorder::default())
    }

    #[test]
    fn empty_set_shows_placeholder() {
        let dir = tempdir().unwrap();
        let mut state = viewer(&dir);
        state.show_current();
        assert!(!state.handle(InputEvent::Next));
        assert!(!state.handle(InputEvent::Previous));
        assert_eq!(state.region.shown, vec![Shown::Placeholder(Placeholder::NoImages)]);
        assert_eq!(state.title("Viewer"), "Viewer");
    }

    #[test]
    fn arrows_page_through_images() {
        let dir = gallery(&[("a.png", 1), ("b.png", 2), ("c.png", 3)]);
        let mut state = viewer(&dir);
        state.show_current();
        state.handle(InputEvent::Next);
        state.handle(InputEvent::Next);
        state.handle(InputEvent::Next);
        state.handle(InputEvent::Previous);
        assert_eq!(
            state.region.shown,
            vec![
                Shown::Image(1),
                Shown::Image(2),
                Shown::Image(3),
                Shown::Image(1),
                Shown::Image(3),
            ]
        );
        assert_eq!(state.title("Viewer"), "Viewer - c.png (3/3)");
    }

    #[test]
    fn broken_image_shows_placeholder_and_keeps_going() {
        let dir = gallery(&[("a.png", 1), ("c.png", 3)]);
        fs::write(dir.path().join("b.png"), b"not an image").unwrap();
        let mut state = viewer(&dir);
        state.show_current();
        state.handle(InputEvent::Next);
        state.handle(InputEvent::Next);
        assert_eq!(
            state.region.shown,
            vec![
                Shown::Image(1),
                Shown::Placeholder(Placeholder::Unreadable("b.png".into())),
                Shown::Image(3),
            ]
        );
    }

    #[test]
    fn toggles_and_quit() {
        let dir = tempdir().unwrap();
        let mut state = viewer(&dir);
        assert!(!state.handle(InputEvent::ToggleInfo));
        assert!(!state.handle(InputEvent::ToggleHelp));
        assert!(state.show_info && state.show_help);
        assert!(state.handle(InputEvent::Quit));
    }

    #[test]
    fn canvas_swaps_image_and_placeholder() {
        let dir = gallery(&[("a.png", 4)]);
        let mut canvas = Canvas::default();
        canvas.set_image(decode_image(&dir.path().join("a.png")).unwrap());
        assert_eq!(canvas.image().map(|d| d.width), Some(4));
        assert_eq!(canvas.placeholder(), None);

        let unreadable = Placeholder::Unreadable("b.png".into());
        canvas.set_placeholder_text(unreadable.clone());
        assert!(canvas.image().is_none());
        assert_eq!(canvas.placeholder(), Some(&unreadable));
    }

    #[test]
    fn placeholder_text_and_colour_follow_kind() {
        let empty = Placeholder::NoImages;
        let unreadable = Placeholder::Unreadable("b.png".into());
        assert_eq!(empty.to_string(), "No images found.");
        assert_eq!(unreadable.to_string(), "Could not load: b.png");
        assert_eq!(empty.color(), WHITE);
        assert_eq!(unreadable.color(), ERROR_COLOR);
    }

    #[test]
    fn render_centres_image() {
        let dir = gallery(&[("a.png", 2)]);
        let nav = Navigator::build(dir.path(), &AllowSet::basic()).unwrap();
        let mut state = ViewerState::new(nav, Canvas::default());
        state.show_current();

        let mut buf = vec![0u32; 4 * 3];
        let mut frame = Frame::new(&mut buf, 4, 3);
        state.render(&mut frame);

        // 2x1 black image centred in a 4x3 frame on a grey background.
        assert_eq!(buf[4 + 1], 0);
        assert_eq!(buf[4 + 2], 0);
        assert_ne!(buf[0], 0);
    }
}
