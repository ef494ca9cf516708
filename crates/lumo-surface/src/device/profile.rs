use std::fmt;

/// Required color/depth/stencil bit depths for a drawable surface.
///
/// Built once per surface initialization. Color channels are matched exactly,
/// depth and stencil are minimums.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct CapabilityProfile {
    red: u8,
    green: u8,
    blue: u8,
    alpha: u8,
    depth: u8,
    stencil: u8,
}

impl CapabilityProfile {
    /// Derives the profile from the translucency flag.
    ///
    /// Translucent surfaces use RGBA8888, opaque ones RGB565 without alpha.
    pub fn new(translucent: bool, depth: u8, stencil: u8) -> Self {
        let (red, green, blue, alpha) = if translucent { (8, 8, 8, 8) } else { (5, 6, 5, 0) };
        Self { red, green, blue, alpha, depth, stencil }
    }

    pub fn red(&self) -> u8 {
        self.red
    }

    pub fn green(&self) -> u8 {
        self.green
    }

    pub fn blue(&self) -> u8 {
        self.blue
    }

    pub fn alpha(&self) -> u8 {
        self.alpha
    }

    pub fn depth(&self) -> u8 {
        self.depth
    }

    pub fn stencil(&self) -> u8 {
        self.stencil
    }

    pub fn is_translucent(&self) -> bool {
        self.alpha > 0
    }

    /// Color channels as `(red, green, blue, alpha)`.
    pub fn rgba(&self) -> (u8, u8, u8, u8) {
        (self.red, self.green, self.blue, self.alpha)
    }
}

impl Default for CapabilityProfile {
    fn default() -> Self {
        Self::new(false, 16, 0)
    }
}

impl fmt::Display for CapabilityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R{}G{}B{}A{} D{} S{}",
            self.red, self.green, self.blue, self.alpha, self.depth, self.stencil
        )
    }
}
