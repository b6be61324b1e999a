mod color;
mod core;

pub use self::core::*;
pub use color::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_serializes_with_plain_field_names() {
        let r = Rect {
            x: 10.0,
            y: 20.0,
            width: 800.0,
            height: 600.0,
        };
        let json = serde_json::to_value(r).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"x": 10.0, "y": 20.0, "width": 800.0, "height": 600.0})
        );
    }

    #[test]
    fn surface_key_display() {
        assert_eq!(SurfaceKey(3).to_string(), "surface-3");
    }

    #[test]
    fn parent_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Parent::Child).unwrap(), "\"child\"");
    }

    #[test]
    fn color_from_hex_short() {
        let c = Color::from_hex("#f80").unwrap();
        assert_eq!(c, Color::from_rgba(255, 136, 0, 255));
    }

    #[test]
    fn color_from_hex_6() {
        let c = Color::from_hex("#ff8800").unwrap();
        assert_eq!(c, Color::from_rgba(255, 136, 0, 255));
    }

    #[test]
    fn color_from_hex_8() {
        let c = Color::from_hex("#ff880080").unwrap();
        assert_eq!(c, Color::from_rgba(255, 136, 0, 128));
    }

    #[test]
    fn color_from_hex_invalid() {
        assert!(Color::from_hex("zzzzzz").is_none());
        assert!(Color::from_hex("#abcd").is_none());
        assert!(Color::from_hex("").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn color_from_rgb_function() {
        let c = Color::parse("rgb(10, 20, 30)").unwrap();
        assert_eq!(c, Color::from_rgba(10, 20, 30, 255));
    }

    #[test]
    fn color_from_rgba_fractional_alpha() {
        let c = Color::parse("rgba(10,20,30,0.5)").unwrap();
        assert_eq!(c, Color::from_rgba(10, 20, 30, 128));
    }

    #[test]
    fn color_from_rgba_byte_alpha() {
        let c = Color::parse("rgba( 10 , 20 , 30 , 128 )").unwrap();
        assert_eq!(c, Color::from_rgba(10, 20, 30, 128));
    }

    #[test]
    fn color_from_rgba_string_invalid() {
        assert!(Color::parse("rgba(10,20,30)").is_none());
        assert!(Color::parse("rgb(10,20,30,40)").is_none());
        assert!(Color::parse("rgba(10,20,30,1.5)").is_none());
        assert!(Color::parse("white").is_none());
    }

    #[test]
    fn color_to_hex() {
        assert_eq!(Color::from_rgba(255, 0, 128, 255).to_hex(), "#ff0080");
        assert_eq!(Color::from_rgba(255, 0, 128, 128).to_hex(), "#ff008080");
    }
}
