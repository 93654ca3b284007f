use anyhow::Result;
use minifb::{Key, Window, WindowOptions};
use opencv::core::Mat;
use opencv::prelude::*;

use crate::hand::Landmark;
use crate::pipeline::RecognizedGesture;
use crate::render::skeleton::{hand_bones, landmark_color, GESTURE_BORDER_COLOR, LANDMARK_RADIUS};

/// minifbを使用したレンダラー
pub struct MinifbRenderer {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    title: String,
    mirror: bool,
}

impl MinifbRenderer {
    /// ウィンドウを作成
    ///
    /// `mirror` が true なら映像とランドマークを左右反転して描く。
    pub fn new(title: &str, width: usize, height: usize, mirror: bool) -> Result<Self> {
        let window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: false,
                ..WindowOptions::default()
            },
        )?;

        Ok(Self {
            window,
            buffer: vec![0u32; width * height],
            width,
            height,
            title: title.to_string(),
            mirror,
        })
    }

    /// ウィンドウが開いているか
    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(Key::Escape)
    }

    /// BGR Mat をバッファにコピー
    pub fn draw_frame(&mut self, frame: &Mat) -> Result<()> {
        let frame_width = frame.cols() as usize;
        let frame_height = frame.rows() as usize;

        for y in 0..self.height.min(frame_height) {
            for x in 0..self.width.min(frame_width) {
                let pixel = frame.at_2d::<opencv::core::Vec3b>(y as i32, x as i32)?;
                let r = pixel[2] as u32;
                let g = pixel[1] as u32;
                let b = pixel[0] as u32;
                self.set_pixel(x as i32, y as i32, (r << 16) | (g << 8) | b);
            }
        }

        Ok(())
    }

    /// 手の骨格を描画 (21点でなければ何もしない)
    pub fn draw_hand(&mut self, landmarks: &[Landmark]) {
        if landmarks.len() != crate::hand::LandmarkIndex::COUNT {
            return;
        }

        for bone in hand_bones() {
            let (x1, y1) = landmarks[bone.start].to_pixel();
            let (x2, y2) = landmarks[bone.end].to_pixel();
            self.draw_line(x1, y1, x2, y2, bone.color);
        }

        for (i, lm) in landmarks.iter().enumerate() {
            let (px, py) = lm.to_pixel();
            self.draw_circle(px, py, LANDMARK_RADIUS, landmark_color(i));
        }
    }

    /// 採用されたジェスチャーをタイトルと枠線で表示
    pub fn draw_gesture(&mut self, gesture: Option<&RecognizedGesture>) {
        match gesture {
            Some(g) => {
                let label = match g.symbol {
                    Some(symbol) => symbol,
                    None => g.name.as_str(),
                };
                self.window.set_title(&format!("{} {}", self.title, label));
                self.draw_border(4, GESTURE_BORDER_COLOR);
            }
            None => self.window.set_title(&self.title),
        }
    }

    /// バッファをウィンドウに表示
    pub fn update(&mut self) -> Result<()> {
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)?;
        Ok(())
    }

    fn draw_border(&mut self, thickness: i32, color: u32) {
        let (w, h) = (self.width as i32, self.height as i32);
        for t in 0..thickness {
            for x in 0..w {
                self.buffer_set(x, t, color);
                self.buffer_set(x, h - 1 - t, color);
            }
            for y in 0..h {
                self.buffer_set(t, y, color);
                self.buffer_set(w - 1 - t, y, color);
            }
        }
    }

    /// Bresenhamのアルゴリズムで線を描画
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        let mut x = x0;
        let mut y = y0;

        loop {
            self.set_pixel(x, y, color);

            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// 円を描画（塗りつぶし）
    fn draw_circle(&mut self, cx: i32, cy: i32, radius: i32, color: u32) {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx * dx + dy * dy <= radius * radius {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// 画像座標でピクセルをセット (反転設定を反映)
    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        let x = if self.mirror { self.width as i32 - 1 - x } else { x };
        self.buffer_set(x, y, color);
    }

    /// バッファ座標でピクセルをセット（境界チェック付き）
    fn buffer_set(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            self.buffer[y as usize * self.width + x as usize] = color;
        }
    }
}
