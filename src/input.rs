use glam::Vec2;
use web_sys as web;

#[inline]
pub fn pointer_client_px(ev: &web::MouseEvent) -> Vec2 {
    Vec2::new(ev.client_x() as f32, ev.client_y() as f32)
}

/// Event timestamp in milliseconds (same clock as `performance.now()`).
#[inline]
pub fn event_time_ms(ev: &web::Event) -> f64 {
    ev.time_stamp()
}

/// Client pixels to normalised device coordinates: -1..1, y up.
#[inline]
pub fn client_to_ndc(p: Vec2, viewport: Vec2) -> Vec2 {
    let v = viewport.max(Vec2::ONE);
    Vec2::new(p.x / v.x * 2.0 - 1.0, 1.0 - p.y / v.y * 2.0).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

/// `pointerType` of a pointer event is "mouse" or "pen"; touch never drives the cursor.
#[inline]
pub fn is_precise_pointer(ev: &web::PointerEvent) -> bool {
    matches!(ev.pointer_type().as_str(), "mouse" | "pen")
}
