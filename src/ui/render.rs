//! Software rendering into a softbuffer framebuffer (`0x00RRGGBB` per pixel).

pub const BG_COLOR: (u8, u8, u8) = (31, 31, 31);

pub type Rgba = (u8, u8, u8, u8);

pub const WHITE: Rgba = (255, 255, 255, 255);

const GLYPH_W: u32 = 5;
const GLYPH_H: u32 = 7;

/// 5x7 bitmap font for ASCII 32..127, one byte per column, LSB = top row.
static FONT_5X7: [[u8; 5]; 96] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // space
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x55, 0x22, 0x50], // &
    [0x00, 0x05, 0x03, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x14, 0x08, 0x3E, 0x08, 0x14], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x3E, 0x41, 0x5D, 0x55, 0x1E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x10, 0x08, 0x08, 0x10, 0x08], // ~
    [0x00, 0x00, 0x00, 0x00, 0x00], // DEL
];

/// Pack RGB into softbuffer's 0x00RRGGBB.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

fn unpack_rgb(v: u32) -> (u8, u8, u8) {
    ((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

fn blend(dst: u32, (r, g, b, a): Rgba) -> u32 {
    let a = a as u32;
    let (dr, dg, db) = unpack_rgb(dst);
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
    rgb(mix(r, dr), mix(g, dg), mix(b, db))
}

/// A borrowed framebuffer with its dimensions.
pub struct Frame<'a> {
    pub pixels: &'a mut [u32],
    pub width: u32,
    pub height: u32,
}

impl<'a> Frame<'a> {
    pub fn new(pixels: &'a mut [u32], width: u32, height: u32) -> Self {
        Self { pixels, width, height }
    }

    pub fn clear(&mut self, (r, g, b): (u8, u8, u8)) {
        self.pixels.fill(rgb(r, g, b));
    }

    fn blend_at(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let off = (y as u32 * self.width + x as u32) as usize;
        if let Some(px) = self.pixels.get_mut(off) {
            *px = blend(*px, color);
        }
    }

    /// Fill a rectangle, alpha blended over what is already there.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: u32, h: u32, color: Rgba) {
        for row in 0..h as i32 {
            for col in 0..w as i32 {
                self.blend_at(x + col, y + row, color);
            }
        }
    }

    fn draw_char(&mut self, ch: char, px: i32, py: i32, scale: u32, color: Rgba) {
        let idx = (ch as u32).wrapping_sub(32) as usize;
        let Some(glyph) = FONT_5X7.get(idx) else {
            return;
        };
        for (col, bits) in glyph.iter().enumerate() {
            for row in 0..GLYPH_H {
                if bits & (1 << row) == 0 {
                    continue;
                }
                let x = px + (col as u32 * scale) as i32;
                let y = py + (row * scale) as i32;
                self.fill_rect(x, y, scale, scale, color);
            }
        }
    }

    /// Draw a single line of text. Returns the x position after the last character.
    pub fn draw_text(&mut self, text: &str, px: i32, py: i32, scale: u32, color: Rgba) -> i32 {
        let mut x = px;
        for ch in text.chars() {
            self.draw_char(ch, x, py, scale, color);
            x += ((GLYPH_W + 1) * scale) as i32;
        }
        x
    }

    /// Draw text centred in the frame.
    pub fn draw_text_centered(&mut self, text: &str, scale: u32, color: Rgba) {
        let (w, h) = text_size(text, scale);
        let x = (self.width as i32 - w as i32) / 2;
        let y = (self.height as i32 - h as i32) / 2;
        self.draw_text(text, x.max(0), y.max(0), scale, color);
    }

    /// Draw an RGBA image scaled by `scale` with its top-left corner at (x0, y0),
    /// nearest-neighbour sampled.
    pub fn blit_scaled(&mut self, src: &[u8], src_w: u32, src_h: u32, x0: f32, y0: f32, scale: f32) {
        if src_w == 0 || src_h == 0 || scale <= 0.0 {
            return;
        }
        let draw_w = src_w as f32 * scale;
        let draw_h = src_h as f32 * scale;

        let dx_start = x0.max(0.0) as u32;
        let dy_start = y0.max(0.0) as u32;
        let dx_end = ((x0 + draw_w).ceil().max(0.0) as u32).min(self.width);
        let dy_end = ((y0 + draw_h).ceil().max(0.0) as u32).min(self.height);
        let inv_scale = 1.0 / scale;

        for dy in dy_start..dy_end {
            let sy = ((dy as f32 - y0) * inv_scale) as u32;
            if sy >= src_h {
                continue;
            }
            for dx in dx_start..dx_end {
                let sx = ((dx as f32 - x0) * inv_scale) as u32;
                if sx >= src_w {
                    continue;
                }
                let si = (sy as usize * src_w as usize + sx as usize) * 4;
                let di = dy as usize * self.width as usize + dx as usize;
                let (Some(p), Some(dst)) = (src.get(si..si + 4), self.pixels.get_mut(di)) else {
                    continue;
                };
                *dst = match p[3] {
                    255 => rgb(p[0], p[1], p[2]),
                    0 => *dst,
                    a => blend(*dst, (p[0], p[1], p[2], a)),
                };
            }
        }
    }
}

/// Pixel size of a line of text at the given scale.
pub fn text_size(text: &str, scale: u32) -> (u32, u32) {
    let n = text.chars().count() as u32;
    let w = if n == 0 { 0 } else { n * (GLYPH_W + 1) * scale - scale };
    (w, GLYPH_H * scale)
}

/// Scale that fits an image inside the window without enlarging it.
pub fn fit_scale(img_w: f32, img_h: f32, win_w: f32, win_h: f32) -> f32 {
    (win_w / img_w).min(win_h / img_h).min(1.0)
}
