// SPDX: CC0-1.0

use core::fmt;
use std::{collections::HashMap, sync::LazyLock};

/// Senses within a description are separated by this.
pub const SENSE_SEPARATOR: &str = " / ";

const DESCRIPTIONS: &[(&str, &str)] = &[
    // greek letters
    ("alpha", "Alpha / Angular Accel."),
    ("beta", "Beta / Ratio"),
    ("gamma", "Gamma / Lorentz Factor"),
    ("delta", "Delta / Difference"),
    ("epsilon", "Epsilon / Permittivity"),
    ("zeta", "Zeta / Damping Ratio"),
    ("eta", "Eta / Efficiency"),
    ("theta", "Theta / Angle"),
    ("iota", "Iota"),
    ("kappa", "Kappa / Curvature"),
    ("lambda", "Lambda / Wavelength"),
    ("mu", "Mu / Mean / Friction"),
    ("nu", "Nu / Frequency"),
    ("xi", "Xi"),
    ("omicron", "Omicron"),
    ("rho", "Rho / Density"),
    ("sigma", "Sigma / Std Dev / Stress"),
    ("tau", "Tau / Time Constant / Torque"),
    ("upsilon", "Upsilon"),
    ("phi", "Phi / Phase Angle"),
    ("chi", "Chi / Susceptibility"),
    ("psi", "Psi / Wave Function"),
    ("omega", "Omega / Angular Frequency"),
    // latin letters
    ("A", "Amplitude / Area"),
    ("a", "Acceleration / Coefficient"),
    ("B", "Magnetic Field"),
    ("b", "Y-intercept / Bias"),
    ("C", "Constant / Capacitance"),
    ("c", "Speed of Light / Constant"),
    ("D", "Diffusion Coeff. / Distance"),
    ("d", "Distance / Diameter"),
    ("E", "Energy / Electric Field"),
    ("e", "Charge / Euler's Number"),
    ("F", "Force"),
    ("f", "Frequency (Hz)"),
    ("G", "Gravitational Constant"),
    ("g", "Gravity (9.81 m/s²)"),
    ("H", "Height / Enthalpy"),
    ("h", "Height / Planck Constant"),
    ("I", "Current / Inertia"),
    ("J", "Current Density / Impulse"),
    ("K", "Kinetic Energy / Constant"),
    ("k", "Spring Constant / Wave Number"),
    ("L", "Length / Inductance"),
    ("l", "Length"),
    ("M", "Mass / Molar Mass"),
    ("m", "Mass / Slope"),
    ("N", "Number of Items / Normal Force"),
    ("n", "Index / Refractive Index"),
    ("P", "Power / Pressure"),
    ("p", "Momentum / Pressure"),
    ("Q", "Charge / Heat"),
    ("q", "Charge"),
    ("R", "Radius / Resistance / Gas Const."),
    ("r", "Radius / Distance"),
    ("S", "Entropy / Surface Area"),
    ("s", "Displacement / Seconds"),
    ("T", "Period / Temperature / Tension"),
    ("t", "Time"),
    ("U", "Potential Energy"),
    ("u", "Velocity / Energy Density"),
    ("V", "Voltage / Volume"),
    ("v", "Velocity"),
    ("W", "Work / Weight"),
    ("w", "Width / Angular Frequency"),
    ("X", "Position X / Reactance"),
    ("x", "Position X"),
    ("Y", "Position Y"),
    ("y", "Position Y"),
    ("Z", "Position Z / Impedance"),
    ("z", "Position Z"),
];

static DESCRIPTION_TABLE: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| DESCRIPTIONS.iter().copied().collect());

/// Table entry for `name`, trying the exact spelling before the lowercase one.
pub fn lookup(name: &str) -> Option<&'static str> {
    DESCRIPTION_TABLE
        .get(name)
        .or_else(|| DESCRIPTION_TABLE.get(name.to_lowercase().as_str()))
        .copied()
}

/// The first sense of a description.
pub fn primary_sense(description: &str) -> &str {
    description
        .split_once(SENSE_SEPARATOR)
        .map_or(description, |(primary, _)| primary)
}

/// Splits a subscripted name such as `x0`, `v_max` or `t_1` into base letters
/// and suffix.
///
/// The base is the longest run of leading letters that still leaves a valid
/// suffix, so names made only of letters give their last letter away:
/// `vmax` splits as `vma` and `x`.
pub fn decompose(name: &str) -> Option<(&str, &str)> {
    let letters = name
        .find(|chr: char| !chr.is_ascii_alphabetic())
        .unwrap_or(name.len());

    let is_suffix = |s: &str| !s.is_empty() && s.chars().all(|chr| chr.is_ascii_alphanumeric());

    // letters are ascii, so every index up to `letters` is a char boundary
    (1..=letters).rev().find_map(|split| {
        let (base, rest) = name.split_at(split);
        match rest.strip_prefix('_') {
            Some(suffix) if is_suffix(suffix) => Some((base, suffix)),
            _ if is_suffix(rest) => Some((base, rest)),
            _ => None,
        }
    })
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Qualifier<'a> {
    Initial,
    Final,
    Axis(&'a str),
    Aggregate(String),
    Numbered(&'a str),
    Index(&'a str),
}

impl<'a> Qualifier<'a> {
    /// Classifies a subscript, first rule wins.
    pub fn classify(suffix: &'a str) -> Self {
        let lower = suffix.to_ascii_lowercase();
        match lower.as_str() {
            "0" | "o" | "init" | "i" | "start" => Self::Initial,
            "f" | "final" | "end" => Self::Final,
            "x" | "y" | "z" => Self::Axis(suffix),
            "max" | "min" | "avg" | "tot" => Self::Aggregate(lower),
            _ if is_numeric(suffix) => Self::Numbered(suffix),
            _ => Self::Index(suffix),
        }
    }

    pub fn apply(&self, sense: &str) -> String {
        match self {
            Self::Initial => format!("Initial {sense}"),
            Self::Final => format!("Final {sense}"),
            Self::Axis(axis) => format!("{sense} ({axis}-axis)"),
            Self::Aggregate(agg) => format!("{sense} ({agg})"),
            Self::Numbered(num) => format!("{sense} {num}"),
            Self::Index(idx) => format!("{sense} (Index {idx})"),
        }
    }
}

impl fmt::Display for Qualifier<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Initial => write!(f, "initial value"),
            Self::Final => write!(f, "final value"),
            Self::Axis(axis) => write!(f, "{axis} component"),
            Self::Aggregate(agg) => write!(f, "{agg} aggregate"),
            Self::Numbered(num) => write!(f, "number {num}"),
            Self::Index(idx) => write!(f, "index {idx}"),
        }
    }
}

/// Whether an alphanumeric subscript reads as a number: a decimal with an
/// optional exponent (`1e5`), a radix integer (`0x1F`, `0o7`, `0b10`), or
/// `Infinity`.
fn is_numeric(s: &str) -> bool {
    fn digits(s: &str, radix: u32) -> bool {
        !s.is_empty() && s.chars().all(|chr| chr.is_digit(radix))
    }

    if s == "Infinity" {
        return true;
    }

    let bytes = s.as_bytes();
    if bytes.len() > 2 && bytes[0] == b'0' {
        let radix = match bytes[1] {
            b'x' | b'X' => Some(16),
            b'o' | b'O' => Some(8),
            b'b' | b'B' => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            return digits(&s[2..], radix);
        }
    }

    match s.split_once(|chr: char| chr == 'e' || chr == 'E') {
        Some((mantissa, exp)) => digits(mantissa, 10) && digits(exp, 10),
        None => digits(s, 10),
    }
}

/// Best-effort human readable description of a parameter name.
pub fn describe_parameter(name: &str) -> Option<String> {
    if let Some(desc) = lookup(name) {
        return Some(desc.to_string());
    }

    let (base, suffix) = decompose(name)?;
    let sense = primary_sense(lookup(base)?);
    Some(Qualifier::classify(suffix).apply(sense))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_lookup() {
        assert_eq!(describe_parameter("omega").unwrap(), "Omega / Angular Frequency");
        assert_eq!(describe_parameter("A").unwrap(), "Amplitude / Area");
        assert_eq!(describe_parameter("a").unwrap(), "Acceleration / Coefficient");
    }

    #[test]
    fn lowercase_lookup() {
        assert_eq!(describe_parameter("Alpha").unwrap(), "Alpha / Angular Accel.");
        assert_eq!(describe_parameter("OMEGA").unwrap(), "Omega / Angular Frequency");
    }

    #[test]
    fn initial_position() {
        let desc = describe_parameter("x0").unwrap();
        assert!(desc.starts_with("Initial"));
        assert!(desc.contains("Position X"));
        assert_eq!(describe_parameter("v_init").unwrap(), "Initial Velocity");
        assert_eq!(describe_parameter("theta_o").unwrap(), "Initial Theta");
    }

    #[test]
    fn final_value() {
        assert_eq!(describe_parameter("v_f").unwrap(), "Final Velocity");
        assert_eq!(describe_parameter("T_end").unwrap(), "Final Period");
    }

    #[test]
    fn axis_keeps_typed_case() {
        assert_eq!(describe_parameter("F_x").unwrap(), "Force (x-axis)");
        assert_eq!(describe_parameter("F_Y").unwrap(), "Force (Y-axis)");
        // letters-only names split off their last letter
        assert_eq!(describe_parameter("dx").unwrap(), "Distance (x-axis)");
    }

    #[test]
    fn aggregate_is_lowercased() {
        assert!(describe_parameter("v_max").unwrap().contains("(max)"));
        assert_eq!(describe_parameter("P_AVG").unwrap(), "Power (avg)");
    }

    #[test]
    fn numbered_and_indexed() {
        assert_eq!(describe_parameter("m1").unwrap(), "Mass 1");
        assert_eq!(describe_parameter("k_12").unwrap(), "Spring Constant 12");
        assert_eq!(describe_parameter("q_1e3").unwrap(), "Charge 1e3");
        assert_eq!(describe_parameter("r_0x1F").unwrap(), "Radius 0x1F");
        assert_eq!(describe_parameter("c_n").unwrap(), "Speed of Light (Index n)");
        assert_eq!(describe_parameter("R_2b").unwrap(), "Radius (Index 2b)");
    }

    #[test]
    fn unknown_base_gives_nothing() {
        assert_eq!(describe_parameter("qqq"), None);
        // `vma` is not a known base, and shorter bases are not tried
        assert_eq!(describe_parameter("vmax"), None);
        assert_eq!(describe_parameter("foo_1"), None);
    }

    #[test]
    fn undecomposable_names() {
        assert_eq!(describe_parameter("_k"), None);
        assert_eq!(describe_parameter("a_b_c"), None);
        assert_eq!(describe_parameter("v_"), None);
        assert_eq!(describe_parameter(""), None);
    }

    #[test]
    fn decomposition() {
        assert_eq!(decompose("x0"), Some(("x", "0")));
        assert_eq!(decompose("v_max"), Some(("v", "max")));
        assert_eq!(decompose("t_1"), Some(("t", "1")));
        assert_eq!(decompose("vmax"), Some(("vma", "x")));
        assert_eq!(decompose("omega2"), Some(("omega", "2")));
        assert_eq!(decompose("v1x"), Some(("v", "1x")));
        assert_eq!(decompose("v"), None);
        assert_eq!(decompose("2v"), None);
        assert_eq!(decompose("a_b_c"), None);
    }

    #[test]
    fn primary_sense_uses_spaced_separator() {
        assert_eq!(primary_sense("Mu / Mean / Friction"), "Mu");
        assert_eq!(primary_sense("Gravity (9.81 m/s²)"), "Gravity (9.81 m/s²)");
    }

    #[test]
    fn numeric_subscripts() {
        for num in ["1", "007", "1e5", "2E10", "0x1f", "0B101", "0o17", "Infinity"] {
            assert!(is_numeric(num), "{num}");
        }
        for not_num in ["1x", "e5", "1e", "0x", "0b2", "infinity", "12ab"] {
            assert!(!is_numeric(not_num), "{not_num}");
        }
    }
}
