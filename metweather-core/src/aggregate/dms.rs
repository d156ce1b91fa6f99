use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    pub fn as_char(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
            Hemisphere::East => 'E',
            Hemisphere::West => 'W',
        }
    }
}

/// Degrees-minutes-seconds form of a coordinate. Components are magnitudes;
/// the sign lives in `hemisphere`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dms {
    pub degree: u32,
    pub minute: u32,
    pub second: u32,
    pub hemisphere: Hemisphere,
}

impl Dms {
    /// Every step truncates toward zero; nothing is rounded.
    pub fn from_degrees(value: f64, axis: Axis) -> Self {
        let degree = value.trunc();
        let minute_f = (value - degree).abs() * 60.0;
        let minute = minute_f.trunc();
        let second = ((minute_f - minute) * 60.0).trunc();

        let positive = value >= 0.0;
        let hemisphere = match (axis, positive) {
            (Axis::Latitude, true) => Hemisphere::North,
            (Axis::Latitude, false) => Hemisphere::South,
            (Axis::Longitude, true) => Hemisphere::East,
            (Axis::Longitude, false) => Hemisphere::West,
        };

        Self {
            degree: degree.abs() as u32,
            minute: minute as u32,
            second: second as u32,
            hemisphere,
        }
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{}'{}\" {}",
            self.degree,
            self.minute,
            self.second,
            self.hemisphere.as_char()
        )
    }
}

/// `53°20'59" N, 6°15'37" W`
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    format!(
        "{}, {}",
        Dms::from_degrees(latitude, Axis::Latitude),
        Dms::from_degrees(longitude, Axis::Longitude)
    )
}
