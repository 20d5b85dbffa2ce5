/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}

pub(crate) fn format_for_counter(num: u32) -> String {
    match num {
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

/// Narrowest square-ish grid that fits `cards`.
pub(crate) fn grid_columns(cards: usize) -> usize {
    let mut columns = 1;
    while columns * columns < cards {
        columns += 1;
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_is_zero_padded_and_capped() {
        assert_eq!(format_for_counter(0), "000");
        assert_eq!(format_for_counter(42), "042");
        assert_eq!(format_for_counter(1234), "999");
    }

    #[test]
    fn grid_is_square_or_wider() {
        assert_eq!(grid_columns(0), 1);
        assert_eq!(grid_columns(2), 2);
        assert_eq!(grid_columns(12), 4);
        assert_eq!(grid_columns(16), 4);
        assert_eq!(grid_columns(18), 5);
    }
}
