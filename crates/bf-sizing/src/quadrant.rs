//! Sizing quadrants: the four candidate limiting scenarios.

use bf_sim::BindingLoad;

/// Year-of-operation × bound-direction scenario (Peere et al. numbering).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quadrant {
    /// Quadrant 1: first year, injection limited (maximum temperature).
    FirstYearCooling,
    /// Quadrant 2: last year, injection limited.
    LastYearCooling,
    /// Quadrant 3: first year, extraction limited (minimum temperature).
    FirstYearHeating,
    /// Quadrant 4: last year, extraction limited.
    LastYearHeating,
}

impl Quadrant {
    pub const ALL: [Quadrant; 4] = [
        Quadrant::FirstYearCooling,
        Quadrant::LastYearCooling,
        Quadrant::FirstYearHeating,
        Quadrant::LastYearHeating,
    ];

    /// Conventional 1-based quadrant number.
    pub fn number(&self) -> u8 {
        match self {
            Quadrant::FirstYearCooling => 1,
            Quadrant::LastYearCooling => 2,
            Quadrant::FirstYearHeating => 3,
            Quadrant::LastYearHeating => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Quadrant> {
        match n {
            1 => Some(Quadrant::FirstYearCooling),
            2 => Some(Quadrant::LastYearCooling),
            3 => Some(Quadrant::FirstYearHeating),
            4 => Some(Quadrant::LastYearHeating),
            _ => None,
        }
    }

    pub fn binding_load(&self) -> BindingLoad {
        match self {
            Quadrant::FirstYearCooling | Quadrant::LastYearCooling => BindingLoad::Cooling,
            Quadrant::FirstYearHeating | Quadrant::LastYearHeating => BindingLoad::Heating,
        }
    }

    pub fn is_first_year(&self) -> bool {
        matches!(
            self,
            Quadrant::FirstYearCooling | Quadrant::FirstYearHeating
        )
    }
}

/// Quadrant selection for a sizing call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuadrantChoice {
    /// Evaluate every quadrant and keep the one requiring the largest depth.
    #[default]
    Auto,
    /// Bypass the search and size for one specific quadrant.
    Pinned(Quadrant),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbering_round_trip() {
        for q in Quadrant::ALL {
            assert_eq!(Quadrant::from_number(q.number()), Some(q));
        }
        assert_eq!(Quadrant::from_number(0), None);
        assert_eq!(Quadrant::from_number(5), None);
    }

    #[test]
    fn binding_sides() {
        assert_eq!(
            Quadrant::FirstYearCooling.binding_load(),
            BindingLoad::Cooling
        );
        assert_eq!(
            Quadrant::LastYearHeating.binding_load(),
            BindingLoad::Heating
        );
        assert!(Quadrant::FirstYearHeating.is_first_year());
        assert!(!Quadrant::LastYearCooling.is_first_year());
    }
}
