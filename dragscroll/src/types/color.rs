use palette::{IntoColor, Oklch, Srgb};

#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Oklch { l: f32, c: f32, h: f32 },
    Rgb { r: u8, g: u8, b: u8 },
    Derived { base: Box<Color>, ops: Vec<ColorOp> },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorOp {
    Lighten(f32),
    Darken(f32),
    Desaturate(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Color {
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::Oklch { l, c, h }
    }

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    pub fn lighten(self, amount: f32) -> Self {
        self.with_op(ColorOp::Lighten(amount))
    }

    pub fn darken(self, amount: f32) -> Self {
        self.with_op(ColorOp::Darken(amount))
    }

    pub fn desaturate(self, amount: f32) -> Self {
        self.with_op(ColorOp::Desaturate(amount))
    }

    fn with_op(self, op: ColorOp) -> Self {
        match self {
            Self::Derived { base, mut ops } => {
                ops.push(op);
                Self::Derived { base, ops }
            }
            other => Self::Derived {
                base: Box::new(other),
                ops: vec![op],
            },
        }
    }

    /// Resolve to sRGB, applying any derivations in Oklch space.
    pub fn to_rgb(&self) -> Rgb {
        match self {
            Self::Rgb { r, g, b } => Rgb::new(*r, *g, *b),
            Self::Oklch { l, c, h } => oklch_to_rgb(Oklch::new(*l, *c, *h)),
            Self::Derived { base, ops } => {
                let mut oklch = base.to_oklch();
                for op in ops {
                    match *op {
                        ColorOp::Lighten(amount) => oklch.l = (oklch.l + amount).min(1.0),
                        ColorOp::Darken(amount) => oklch.l = (oklch.l - amount).max(0.0),
                        ColorOp::Desaturate(amount) => oklch.chroma = (oklch.chroma - amount).max(0.0),
                    }
                }
                oklch_to_rgb(oklch)
            }
        }
    }

    fn to_oklch(&self) -> Oklch {
        match self {
            Self::Oklch { l, c, h } => Oklch::new(*l, *c, *h),
            other => {
                let rgb = other.to_rgb();
                let srgb: Srgb = Srgb::new(rgb.r, rgb.g, rgb.b).into_format();
                srgb.into_color()
            }
        }
    }
}

fn oklch_to_rgb(oklch: Oklch) -> Rgb {
    let srgb: Srgb = oklch.into_color();
    let (r, g, b) = srgb.into_format::<u8>().into_components();
    Rgb::new(r, g, b)
}
