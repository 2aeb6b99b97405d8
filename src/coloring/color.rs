bitflags::bitflags! {
    /// Set of output channels an edge contributes its distance to.
    ///
    /// An empty set ([`EdgeColor::BLACK`]) marks an edge that no channel can see.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct EdgeColor: u8 {
        /// Red channel.
        const RED = 0b001;
        /// Green channel.
        const GREEN = 0b010;
        /// Blue channel.
        const BLUE = 0b100;
        /// Red and green.
        const YELLOW = Self::RED.bits() | Self::GREEN.bits();
        /// Red and blue.
        const MAGENTA = Self::RED.bits() | Self::BLUE.bits();
        /// Green and blue.
        const CYAN = Self::GREEN.bits() | Self::BLUE.bits();
        /// All three channels.
        const WHITE = Self::RED.bits() | Self::GREEN.bits() | Self::BLUE.bits();
    }
}

impl EdgeColor {
    /// No channels.
    pub const BLACK: Self = Self::empty();

    /// The two-channel colors that coloring cycles through.
    pub(crate) const PALETTE: [Self; 3] = [Self::CYAN, Self::MAGENTA, Self::YELLOW];

    /// True when exactly one channel bit is set.
    pub(crate) fn is_single_channel(self) -> bool {
        self.bits().count_ones() == 1
    }
}

impl Default for EdgeColor {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Seed-driven color cycling state shared by the coloring strategies.
///
/// The seed is consumed digit by digit (base 3 for the first pick, base 2 for
/// each switch) so every seed, zero included, yields a fixed sequence.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ColorCycle {
    seed: u64,
}

impl ColorCycle {
    pub(crate) fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub(crate) fn initial(&mut self) -> EdgeColor {
        let c = EdgeColor::PALETTE[(self.seed % 3) as usize];
        self.seed /= 3;
        c
    }

    /// Move `color` to a different two-channel color, avoiding `banned` when the
    /// two share exactly one channel.
    pub(crate) fn switch(&mut self, color: &mut EdgeColor, banned: EdgeColor) {
        let combined = *color & banned;
        if combined.is_single_channel() {
            *color = combined ^ EdgeColor::WHITE;
            return;
        }
        if *color == EdgeColor::BLACK || *color == EdgeColor::WHITE {
            *color = EdgeColor::PALETTE[(self.seed % 3) as usize];
            self.seed /= 3;
            return;
        }
        let shifted = u32::from(color.bits()) << (1 + (self.seed & 1));
        *color = EdgeColor::from_bits_truncate(((shifted | (shifted >> 3)) & 0b111) as u8);
        self.seed >>= 1;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/coloring/color.rs"]
mod tests;
