use super::*;

#[test]
fn named_colors_compose_from_channels() {
    assert_eq!(EdgeColor::CYAN, EdgeColor::GREEN | EdgeColor::BLUE);
    assert_eq!(EdgeColor::WHITE.bits(), 0b111);
    assert!(EdgeColor::BLACK.is_empty());
    assert_eq!(EdgeColor::default(), EdgeColor::WHITE);
}

#[test]
fn switch_always_lands_on_a_different_two_channel_color() {
    for seed in [0u64, 1, 2, 7, 12345, u64::MAX] {
        let mut cycle = ColorCycle::new(seed);
        let mut color = cycle.initial();
        for _ in 0..16 {
            let before = color;
            cycle.switch(&mut color, EdgeColor::BLACK);
            assert_ne!(before, color);
            assert_eq!(color.bits().count_ones(), 2);
        }
    }
}

#[test]
fn switch_respects_banned_color() {
    let mut cycle = ColorCycle::new(0);
    let mut color = EdgeColor::CYAN;
    cycle.switch(&mut color, EdgeColor::YELLOW);
    // CYAN & YELLOW = GREEN, so the only legal move avoids both.
    assert_eq!(color, EdgeColor::MAGENTA);
}

#[test]
fn seed_zero_is_a_real_seed() {
    let mut a = ColorCycle::new(0);
    let mut b = ColorCycle::new(0);
    assert_eq!(a.initial(), b.initial());
    assert_eq!(ColorCycle::new(0).initial(), EdgeColor::CYAN);
}
