use proptest::prelude::*;
use rust_pixel_code::{decode, encode, label_for, resolve, Rgba};

fn any_rgba() -> impl Strategy<Value = Rgba> {
    any::<[u8; 4]>().prop_map(Rgba::from)
}

fn any_position() -> impl Strategy<Value = (usize, usize, usize)> {
    prop_oneof![Just(8usize), Just(16), Just(24), Just(32)]
        .prop_flat_map(|size| (Just(size), 0..size, 0..size))
}

proptest! {
    #[test]
    fn decode_inverts_encode((size, row, col) in any_position(), color in any_rgba()) {
        let code = encode(size, row, col, color).unwrap();
        let pixel = decode(&code).unwrap();

        prop_assert_eq!(pixel.size, size);
        prop_assert_eq!(pixel.row, label_for(row).unwrap());
        prop_assert_eq!(pixel.col, col);
        prop_assert_eq!(pixel.color, color);
    }

    #[test]
    fn separator_is_optional((size, row, col) in any_position(), color in any_rgba()) {
        let code = encode(size, row, col, color).unwrap();
        let joined = code.replacen('_', "", 1);
        // the column swallows leading color digits once the separator is gone
        if color.to_hex().starts_with(|c: char| !c.is_ascii_digit()) {
            prop_assert_eq!(decode(&joined).unwrap(), decode(&code).unwrap());
        }
    }

    #[test]
    fn resolve_is_total(token in ".*") {
        let _ = resolve(&token);
    }

    #[test]
    fn hex_tokens_resolve_to_themselves(color in any_rgba()) {
        prop_assert_eq!(resolve(&color.to_hex()), color);
        prop_assert_eq!(resolve(&format!("#{}", color.to_hex().to_lowercase())), color);
    }
}
