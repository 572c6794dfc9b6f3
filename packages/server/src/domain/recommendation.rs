//! Static recommendation table, refreshed to a user after each logged activity.

use serde::Serialize;

use super::value_object::ActivityCategory;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: &'static str,
    pub description: &'static str,
    /// Estimated monthly saving in kg CO2e
    pub estimated_saving_kg: f64,
}

const TRANSPORTATION: &[Recommendation] = &[
    Recommendation {
        title: "Try public transport",
        description: "Replace two car commutes a week with bus or train.",
        estimated_saving_kg: 12.0,
    },
    Recommendation {
        title: "Cycle short trips",
        description: "Trips under 5 km are often faster by bike.",
        estimated_saving_kg: 8.0,
    },
];

const ENERGY: &[Recommendation] = &[
    Recommendation {
        title: "Switch to LED lighting",
        description: "LED bulbs use about 75% less energy than incandescent ones.",
        estimated_saving_kg: 5.0,
    },
    Recommendation {
        title: "Lower the thermostat by 1°C",
        description: "Each degree saves roughly 6% of heating energy.",
        estimated_saving_kg: 15.0,
    },
];

const DIET: &[Recommendation] = &[
    Recommendation {
        title: "Meat-free Mondays",
        description: "One plant-based day a week cuts food emissions noticeably.",
        estimated_saving_kg: 10.0,
    },
    Recommendation {
        title: "Buy local and seasonal",
        description: "Seasonal produce avoids heated greenhouses and air freight.",
        estimated_saving_kg: 4.0,
    },
];

const WASTE: &[Recommendation] = &[Recommendation {
    title: "Compost food scraps",
    description: "Composting keeps organic waste out of methane-producing landfill.",
    estimated_saving_kg: 6.0,
}];

const WATER: &[Recommendation] = &[Recommendation {
    title: "Shorter showers",
    description: "Cutting two minutes per shower saves water and heating energy.",
    estimated_saving_kg: 3.0,
}];

const SHOPPING: &[Recommendation] = &[Recommendation {
    title: "Repair before replacing",
    description: "Extending the life of electronics and clothing avoids manufacturing emissions.",
    estimated_saving_kg: 9.0,
}];

/// Recommendations for a category.
pub fn recommendations_for(category: ActivityCategory) -> &'static [Recommendation] {
    match category {
        ActivityCategory::Transportation => TRANSPORTATION,
        ActivityCategory::Energy => ENERGY,
        ActivityCategory::Diet => DIET,
        ActivityCategory::Waste => WASTE,
        ActivityCategory::Water => WATER,
        ActivityCategory::Shopping => SHOPPING,
    }
}
