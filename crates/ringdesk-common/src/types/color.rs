use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse any colour form web content sends: `#rgb`, `#rrggbb`,
    /// `#rrggbbaa`, `rgb(r,g,b)` or `rgba(r,g,b,a)`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.starts_with('#') {
            Self::from_hex(s)
        } else {
            Self::from_rgba_string(s)
        }
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let mut out = [0u8; 3];
                for (slot, ch) in out.iter_mut().zip(hex.chars()) {
                    let v = ch.to_digit(16)? as u8;
                    *slot = v * 16 + v;
                }
                Some(Self::from_rgba(out[0], out[1], out[2], 255))
            }
            6 => Some(Self::from_rgba(channel(0)?, channel(2)?, channel(4)?, 255)),
            8 => Some(Self::from_rgba(
                channel(0)?,
                channel(2)?,
                channel(4)?,
                channel(6)?,
            )),
            _ => None,
        }
    }

    /// Parse `rgb(r,g,b)` or `rgba(r,g,b,a)`. Alpha may be a CSS fraction
    /// (`0.5`) or a byte (`128`).
    pub fn from_rgba_string(s: &str) -> Option<Self> {
        let s = s.trim();
        let (inner, expected) = if let Some(rest) = s.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, 4)
        } else {
            (s.strip_prefix("rgb(")?.strip_suffix(')')?, 3)
        };
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != expected {
            return None;
        }
        let r = parts[0].parse::<u8>().ok()?;
        let g = parts[1].parse::<u8>().ok()?;
        let b = parts[2].parse::<u8>().ok()?;
        let a = match parts.get(3) {
            None => 255,
            Some(a) => match a.parse::<u8>() {
                Ok(byte) => byte,
                Err(_) => {
                    let frac = a.parse::<f64>().ok()?;
                    if !(0.0..=1.0).contains(&frac) {
                        return None;
                    }
                    (frac * 255.0).round() as u8
                }
            },
        };
        Some(Self { r, g, b, a })
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_tuple(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}
