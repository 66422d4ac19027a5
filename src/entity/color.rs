use rand::Rng;

/// CSS `hsl()` color string.
pub fn pastel(hue: f64, saturation: u8, lightness: u8) -> String {
    format!("hsl({}, {}%, {}%)", hue, saturation, lightness)
}

/// Pastel color with a hue drawn uniformly from `[0, 360)`.
pub fn random_pastel<R: Rng + ?Sized>(rng: &mut R, saturation: u8, lightness: u8) -> String {
    let hue: f64 = rng.gen_range(0.0..360.0);
    pastel(hue, saturation, lightness)
}
