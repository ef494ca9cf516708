use std::fmt;

use super::CapabilityProfile;

/// Client API bits a configuration can render with.
///
/// Values mirror the EGL `RENDERABLE_TYPE` bitmask so platform layers can pass
/// the raw attribute through.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct RenderableApi(pub u32);

impl RenderableApi {
    pub const GLES1: Self = Self(0x0001);
    pub const OPENVG: Self = Self(0x0002);
    pub const GLES2: Self = Self(0x0004);
    pub const OPENGL: Self = Self(0x0008);
    pub const GLES3: Self = Self(0x0040);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// Attribute set queried from a platform configuration.
///
/// The first six fields drive selection; the rest are diagnostics only.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct ConfigAttributes {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
    pub depth: u8,
    pub stencil: u8,

    pub samples: u8,
    pub sample_buffers: u8,
    pub renderable: RenderableApi,
    pub hardware_accelerated: bool,
    pub srgb: bool,
}

impl ConfigAttributes {
    /// Creates an attribute set with only the selection-relevant sizes filled in.
    pub fn with_sizes(red: u8, green: u8, blue: u8, alpha: u8, depth: u8, stencil: u8) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
            depth,
            stencil,
            renderable: RenderableApi::GLES2,
            hardware_accelerated: true,
            ..Default::default()
        }
    }

    /// Total color buffer depth in bits.
    pub fn buffer_size(&self) -> u16 {
        self.red as u16 + self.green as u16 + self.blue as u16 + self.alpha as u16
    }

    /// Exact color match plus depth/stencil minimums.
    pub fn satisfies(&self, required: &CapabilityProfile) -> bool {
        self.depth >= required.depth()
            && self.stencil >= required.stencil()
            && (self.red, self.green, self.blue, self.alpha) == required.rgba()
    }
}

impl fmt::Display for ConfigAttributes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "buffer={} r={} g={} b={} a={} depth={} stencil={} samples={} sample_buffers={} renderable=0x{:x} hw={} srgb={}",
            self.buffer_size(),
            self.red,
            self.green,
            self.blue,
            self.alpha,
            self.depth,
            self.stencil,
            self.samples,
            self.sample_buffers,
            self.renderable.0,
            self.hardware_accelerated,
            self.srgb,
        )
    }
}

/// A platform-offered configuration together with its queried attributes.
///
/// `H` is the platform handle (e.g. an EGL config). Candidates only live for
/// the duration of a selection.
#[derive(Debug, Clone)]
pub struct ConfigCandidate<H> {
    pub handle: H,
    pub attributes: ConfigAttributes,
}

impl<H> ConfigCandidate<H> {
    pub fn new(handle: H, attributes: ConfigAttributes) -> Self {
        Self { handle, attributes }
    }
}

/// Loose renderability predicate used to bound the platform enumeration.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CoarseFilter {
    pub api: RenderableApi,
    pub min_red: u8,
    pub min_green: u8,
    pub min_blue: u8,
}

impl CoarseFilter {
    /// GLES2-renderable with at least 4 bits per color channel.
    pub const GLES2: Self = Self {
        api: RenderableApi::GLES2,
        min_red: 4,
        min_green: 4,
        min_blue: 4,
    };

    pub fn admits(&self, attrs: &ConfigAttributes) -> bool {
        attrs.renderable.contains(self.api)
            && attrs.red >= self.min_red
            && attrs.green >= self.min_green
            && attrs.blue >= self.min_blue
    }
}

impl Default for CoarseFilter {
    fn default() -> Self {
        Self::GLES2
    }
}
