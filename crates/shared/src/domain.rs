use serde::{Deserialize, Serialize};

/// Label of the "nothing selected yet" entry of every choice list. Its value is `""`.
pub const PLACEHOLDER_LABEL: &str = "-- Select --";

pub const STATES: [&str; 28] = [
    "Andhra Pradesh",
    "Arunachal Pradesh",
    "Assam",
    "Bihar",
    "Chhattisgarh",
    "Goa",
    "Gujarat",
    "Haryana",
    "Himachal Pradesh",
    "Jharkhand",
    "Karnataka",
    "Kerala",
    "Madhya Pradesh",
    "Maharashtra",
    "Manipur",
    "Meghalaya",
    "Mizoram",
    "Nagaland",
    "Odisha",
    "Punjab",
    "Rajasthan",
    "Sikkim",
    "Tamil Nadu",
    "Telangana",
    "Tripura",
    "Uttar Pradesh",
    "Uttarakhand",
    "West Bengal",
];

pub const SEASONS: [&str; 8] = [
    "Kharif", "Rabi", "Zaid", "Spring", "Summer", "Monsoon", "Autumn", "Winter",
];

pub const CROP_TYPES: [&str; 8] = [
    "Rice",
    "Wheat",
    "Maize",
    "Soybean",
    "Potato",
    "Cotton",
    "Jute",
    "Sugarcane",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Closed set of literal values, rendered as a selector.
    Choice(&'static [&'static str]),
    /// Decimal quantity entered as text.
    Numeric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    State,
    Season,
    CropType,
    Rainfall,
    AvgTemp,
    PesticideUsage,
    Fertilizer,
    Area,
}

impl FormField {
    /// Every field, in the order the form displays them.
    pub const ALL: [FormField; 8] = [
        FormField::State,
        FormField::Season,
        FormField::CropType,
        FormField::Rainfall,
        FormField::AvgTemp,
        FormField::PesticideUsage,
        FormField::Fertilizer,
        FormField::Area,
    ];

    pub fn wire_name(self) -> &'static str {
        match self {
            FormField::State => "state",
            FormField::Season => "season",
            FormField::CropType => "crop_type",
            FormField::Rainfall => "rainfall",
            FormField::AvgTemp => "avg_temp",
            FormField::PesticideUsage => "pesticide_usage",
            FormField::Fertilizer => "fertilizer",
            FormField::Area => "area",
        }
    }

    pub fn from_wire_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.wire_name() == name)
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::State => "State",
            FormField::Season => "Season",
            FormField::CropType => "Crop Type",
            FormField::Rainfall => "Rainfall (mm)",
            FormField::AvgTemp => "Avg Temp (°C)",
            FormField::PesticideUsage => "Pesticide Usage (tonnes)",
            FormField::Fertilizer => "Fertilizer (kg/ha)",
            FormField::Area => "Area (ha)",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FormField::State => FieldKind::Choice(&STATES),
            FormField::Season => FieldKind::Choice(&SEASONS),
            FormField::CropType => FieldKind::Choice(&CROP_TYPES),
            FormField::Rainfall
            | FormField::AvgTemp
            | FormField::PesticideUsage
            | FormField::Fertilizer
            | FormField::Area => FieldKind::Numeric,
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Raw values of every form control, exactly as the user left them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormInput {
    pub state: String,
    pub season: String,
    pub crop_type: String,
    pub rainfall: String,
    pub avg_temp: String,
    pub pesticide_usage: String,
    pub fertilizer: String,
    pub area: String,
}

impl FormInput {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::State => &self.state,
            FormField::Season => &self.season,
            FormField::CropType => &self.crop_type,
            FormField::Rainfall => &self.rainfall,
            FormField::AvgTemp => &self.avg_temp,
            FormField::PesticideUsage => &self.pesticide_usage,
            FormField::Fertilizer => &self.fertilizer,
            FormField::Area => &self.area,
        }
    }

    /// Replaces a single field; every other field keeps its value.
    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let slot = match field {
            FormField::State => &mut self.state,
            FormField::Season => &mut self.season,
            FormField::CropType => &mut self.crop_type,
            FormField::Rainfall => &mut self.rainfall,
            FormField::AvgTemp => &mut self.avg_temp,
            FormField::PesticideUsage => &mut self.pesticide_usage,
            FormField::Fertilizer => &mut self.fertilizer,
            FormField::Area => &mut self.area,
        };
        *slot = value.into();
    }

    /// First required field (in display order) that is still empty.
    pub fn first_missing(&self) -> Option<FormField> {
        FormField::ALL
            .into_iter()
            .find(|field| self.get(*field).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn choice_lists_match_the_form() {
        assert_eq!(STATES.len(), 28);
        assert_eq!(STATES[0], "Andhra Pradesh");
        assert_eq!(STATES[27], "West Bengal");
        assert_eq!(SEASONS[2], "Zaid");
        assert_eq!(CROP_TYPES[7], "Sugarcane");
        assert_eq!(FormField::Season.kind(), FieldKind::Choice(&SEASONS));
        assert_eq!(FormField::Area.kind(), FieldKind::Numeric);
    }

    #[test]
    fn wire_names_round_trip_for_every_field() {
        for field in FormField::ALL {
            assert_eq!(FormField::from_wire_name(field.wire_name()), Some(field));
        }
        assert_eq!(FormField::from_wire_name("avg_temperature"), None);
    }

    #[test]
    fn set_replaces_only_the_named_field() {
        let mut input = FormInput::default();
        input.set(FormField::Rainfall, "1200");
        input.set(FormField::State, "Kerala");
        input.set(FormField::Rainfall, "900");

        assert_eq!(input.get(FormField::Rainfall), "900");
        assert_eq!(input.get(FormField::State), "Kerala");
        assert_eq!(input.get(FormField::Season), "");
    }

    #[test]
    fn first_missing_follows_display_order() {
        let mut input = FormInput::default();
        assert_eq!(input.first_missing(), Some(FormField::State));

        for field in FormField::ALL {
            input.set(field, "1");
        }
        assert_eq!(input.first_missing(), None);

        input.set(FormField::Fertilizer, "");
        input.set(FormField::Area, "");
        assert_eq!(input.first_missing(), Some(FormField::Fertilizer));
    }
}
