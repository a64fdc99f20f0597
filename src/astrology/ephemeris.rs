//! Ecliptic longitudes of the Sun, Moon and planets.
//!
//! [`KeplerianEphemeris`] propagates mean orbital elements (J2000 ecliptic, linear rates per
//! Julian century) for the planets and Pluto, takes geocentric differences against the
//! Earth-Moon barycentre, and precesses the result to the mean equinox of date. The Moon uses a
//! truncated lunar series. Accuracy is a few arc-minutes for the planets and about 0.3° for the
//! Moon, well inside a 30° sign. The element set is fitted to 1800-2050; dates outside that
//! interval are rejected.

use super::Body;
use thiserror::Error;

/// Julian Day of the J2000.0 epoch.
pub const J2000: f64 = 2_451_545.0;

const DAYS_PER_CENTURY: f64 = 36_525.0;

/// General precession in longitude, degrees per Julian century.
const PRECESSION_DEG_PER_CENTURY: f64 = 1.396_971_3;

/// Julian Day of 1800-01-01 0h, the start of the mean-element fit interval.
pub const MIN_JULIAN_DAY: f64 = 2_378_496.5;

/// Julian Day of 2051-01-01 0h, the end of the mean-element fit interval.
pub const MAX_JULIAN_DAY: f64 = 2_470_172.5;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum EphemerisError {
    #[error("Julian Day {0} is outside the supported range (years 1800 to 2050)")]
    OutOfRange(f64),

    #[error("Julian Day is not a finite number")]
    NotFinite,

    #[error("{0}")]
    Computation(String),
}

/// Source of ecliptic longitudes.
pub trait Ephemeris: Send + Sync {
    /// Julian Day for a Gregorian calendar date and fractional hour (UT).
    fn julian_day(&self, year: i32, month: u32, day: u32, hour: f64) -> f64 {
        julian_day(year, month, day, hour)
    }

    /// Geocentric ecliptic longitude of `body` in degrees, in `[0, 360)`.
    fn longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError>;
}

/// Julian Day for a Gregorian calendar date (Meeus, Astronomical Algorithms ch. 7).
pub fn julian_day(year: i32, month: u32, day: u32, hour: f64) -> f64 {
    let (mut y, mut m) = (year as f64, month as f64);
    if month <= 2 {
        y -= 1.0;
        m += 12.0;
    }

    let a = (y / 100.0).floor();
    let b = 2.0 - a + (a / 4.0).floor();

    (365.25 * (y + 4716.0)).floor() + (30.6001 * (m + 1.0)).floor() + day as f64 + b - 1524.5
        + hour / 24.0
}

/// Wrap an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Keplerian elements at J2000 and their rates per century:
/// semi-major axis (AU), eccentricity, inclination, mean longitude,
/// longitude of perihelion, longitude of ascending node (degrees).
struct OrbitalElements {
    a: [f64; 2],
    e: [f64; 2],
    i: [f64; 2],
    l: [f64; 2],
    perihelion: [f64; 2],
    node: [f64; 2],
}

const MERCURY: OrbitalElements = OrbitalElements {
    a: [0.387_099_27, 0.000_000_37],
    e: [0.205_635_93, 0.000_019_06],
    i: [7.004_979_02, -0.005_947_49],
    l: [252.250_323_50, 149_472.674_111_75],
    perihelion: [77.457_796_28, 0.160_476_89],
    node: [48.330_765_93, -0.125_340_81],
};

const VENUS: OrbitalElements = OrbitalElements {
    a: [0.723_335_66, 0.000_003_90],
    e: [0.006_776_72, -0.000_041_07],
    i: [3.394_676_05, -0.000_788_90],
    l: [181.979_099_50, 58_517.815_387_29],
    perihelion: [131.602_467_18, 0.002_683_29],
    node: [76.679_842_55, -0.277_694_18],
};

const EARTH_MOON: OrbitalElements = OrbitalElements {
    a: [1.000_002_61, 0.000_005_62],
    e: [0.016_711_23, -0.000_043_92],
    i: [-0.000_015_31, -0.012_946_68],
    l: [100.464_571_66, 35_999.372_449_81],
    perihelion: [102.937_681_93, 0.323_273_64],
    node: [0.0, 0.0],
};

const MARS: OrbitalElements = OrbitalElements {
    a: [1.523_710_34, 0.000_018_47],
    e: [0.093_394_10, 0.000_078_82],
    i: [1.849_691_42, -0.008_131_31],
    l: [-4.553_432_05, 19_140.302_684_99],
    perihelion: [-23.943_629_59, 0.444_410_88],
    node: [49.559_538_91, -0.292_573_43],
};

const JUPITER: OrbitalElements = OrbitalElements {
    a: [5.202_887_00, -0.000_116_07],
    e: [0.048_386_24, -0.000_132_53],
    i: [1.304_396_95, -0.001_837_14],
    l: [34.396_440_51, 3_034.746_127_75],
    perihelion: [14.728_479_83, 0.212_526_68],
    node: [100.473_909_09, 0.204_691_06],
};

const SATURN: OrbitalElements = OrbitalElements {
    a: [9.536_675_94, -0.001_250_60],
    e: [0.053_861_79, -0.000_509_91],
    i: [2.485_991_87, 0.001_936_09],
    l: [49.954_244_23, 1_222.493_622_01],
    perihelion: [92.598_878_31, -0.418_972_16],
    node: [113.662_424_48, -0.288_677_94],
};

const URANUS: OrbitalElements = OrbitalElements {
    a: [19.189_164_64, -0.001_961_76],
    e: [0.047_257_44, -0.000_043_97],
    i: [0.772_637_83, -0.002_429_39],
    l: [313.238_104_51, 428.482_027_85],
    perihelion: [170.954_276_30, 0.408_052_81],
    node: [74.016_925_03, 0.042_405_89],
};

const NEPTUNE: OrbitalElements = OrbitalElements {
    a: [30.069_922_76, 0.000_262_91],
    e: [0.008_590_48, 0.000_051_05],
    i: [1.770_043_47, 0.000_353_72],
    l: [-55.120_029_69, 218.459_453_25],
    perihelion: [44.964_762_27, -0.322_414_64],
    node: [131.784_225_74, -0.005_086_64],
};

const PLUTO: OrbitalElements = OrbitalElements {
    a: [39.482_116_75, -0.000_315_96],
    e: [0.248_827_30, 0.000_051_70],
    i: [17.140_012_06, 0.000_048_18],
    l: [238.929_038_33, 145.207_805_15],
    perihelion: [224.068_916_29, -0.040_629_42],
    node: [110.303_936_84, -0.011_834_82],
};

fn elements(body: Body) -> Option<&'static OrbitalElements> {
    match body {
        Body::Sun | Body::Moon => None,
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Pluto => Some(&PLUTO),
    }
}

/// Solve Kepler's equation `E - e sin E = M` (radians) by Newton iteration.
fn eccentric_anomaly(mean_anomaly: f64, e: f64) -> f64 {
    let mut ea = mean_anomaly + e * mean_anomaly.sin();
    for _ in 0..30 {
        let delta = (ea - e * ea.sin() - mean_anomaly) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < 1e-12 {
            break;
        }
    }
    ea
}

/// Heliocentric ecliptic coordinates (AU, J2000 frame) at `t` centuries from J2000.
fn heliocentric(el: &OrbitalElements, t: f64) -> [f64; 3] {
    let at = |pair: [f64; 2]| pair[0] + pair[1] * t;

    let a = at(el.a);
    let e = at(el.e);
    let i = at(el.i).to_radians();
    let l = at(el.l);
    let perihelion = at(el.perihelion);
    let node = at(el.node);

    let omega = (perihelion - node).to_radians();
    let node = node.to_radians();
    let mut m = (l - perihelion).rem_euclid(360.0);
    if m > 180.0 {
        m -= 360.0;
    }

    let ea = eccentric_anomaly(m.to_radians(), e);
    let xp = a * (ea.cos() - e);
    let yp = a * (1.0 - e * e).sqrt() * ea.sin();

    let (so, co) = omega.sin_cos();
    let (sn, cn) = node.sin_cos();
    let (si, ci) = i.sin_cos();

    [
        (co * cn - so * sn * ci) * xp + (-so * cn - co * sn * ci) * yp,
        (co * sn + so * cn * ci) * xp + (-so * sn + co * cn * ci) * yp,
        (so * si) * xp + (co * si) * yp,
    ]
}

/// Geocentric longitude of the Moon, mean equinox of date (degrees, unwrapped).
fn moon_longitude(t: f64) -> f64 {
    let term = |amplitude: f64, phase: f64, rate: f64| {
        amplitude * (phase + rate * t).to_radians().sin()
    };

    218.32 + 481_267.881 * t
        + term(6.29, 135.0, 477_198.87)
        - term(1.27, 259.3, -413_335.36)
        + term(0.66, 235.7, 890_534.22)
        + term(0.21, 269.9, 954_397.74)
        - term(0.19, 357.5, 35_999.05)
        - term(0.11, 186.5, 966_404.03)
}

/// Built-in analytical ephemeris.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeplerianEphemeris;

impl KeplerianEphemeris {
    pub fn new() -> Self {
        Self
    }
}

impl Ephemeris for KeplerianEphemeris {
    fn longitude(&self, julian_day: f64, body: Body) -> Result<f64, EphemerisError> {
        if !julian_day.is_finite() {
            return Err(EphemerisError::NotFinite);
        }

        if !(MIN_JULIAN_DAY..MAX_JULIAN_DAY).contains(&julian_day) {
            return Err(EphemerisError::OutOfRange(julian_day));
        }
        let t = (julian_day - J2000) / DAYS_PER_CENTURY;

        let longitude = match body {
            Body::Moon => moon_longitude(t),
            _ => {
                let earth = heliocentric(&EARTH_MOON, t);
                let (x, y) = match elements(body) {
                    Some(el) => {
                        let planet = heliocentric(el, t);
                        (planet[0] - earth[0], planet[1] - earth[1])
                    }
                    // The Sun seen from Earth is the Earth seen from the Sun, reversed.
                    None => (-earth[0], -earth[1]),
                };
                y.atan2(x).to_degrees() + PRECESSION_DEG_PER_CENTURY * t
            }
        };

        if !longitude.is_finite() {
            return Err(EphemerisError::Computation(format!(
                "non-finite longitude for {}",
                body.name()
            )));
        }

        Ok(normalize_degrees(longitude))
    }
}
