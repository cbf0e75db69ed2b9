use crate::constants::{CONFETTI_PIECE_H, CONFETTI_PIECE_W};
use crate::dom;
use valentine_core::confetti::ConfettiField;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Full-viewport 2D canvas the confetti is drawn on.
pub struct ConfettiCanvas {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl ConfettiCanvas {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| anyhow::anyhow!("{:?}", e))?
            .ok_or_else(|| anyhow::anyhow!("2d context unavailable"))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let c = Self { canvas, ctx };
        c.resize();
        Ok(c)
    }

    pub fn resize(&self) {
        dom::sync_canvas_backing_size(&self.canvas);
    }

    fn device_pixel_ratio() -> f64 {
        web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0)
    }

    pub fn draw(&self, field: &ConfettiField) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        self.ctx.clear_rect(0.0, 0.0, w, h);
        if field.is_empty() {
            return;
        }
        let dpr = Self::device_pixel_ratio();
        for p in field.pieces() {
            self.ctx.save();
            _ = self.ctx.translate(p.pos.x as f64 * dpr, p.pos.y as f64 * dpr);
            _ = self.ctx.rotate(p.tilt as f64);
            // Wobble squashes the piece to fake a flip around its long axis.
            let flip = (p.wobble as f64).cos().abs().max(0.15);
            self.ctx.set_global_alpha(p.opacity().clamp(0.0, 1.0) as f64);
            self.ctx.set_fill_style_str(&p.color.to_css());
            let pw = CONFETTI_PIECE_W * dpr;
            let ph = CONFETTI_PIECE_H * dpr * flip;
            self.ctx.fill_rect(-pw * 0.5, -ph * 0.5, pw, ph);
            self.ctx.restore();
        }
    }
}
