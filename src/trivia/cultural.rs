//! Per-anime cultural trivia material

pub const FOOD_TYPES: [&str; 4] = ["Seafood", "Sweets", "Savory food", "Drinks"];

pub struct FoodPreference {
    pub character: &'static str,
    pub item: &'static str,
    pub food_type: &'static str,
    pub context: &'static str,
}

pub struct TraditionMoment {
    pub context: &'static str,
    pub concept: &'static str,
    pub distractors: [&'static str; 3],
    pub detail: &'static str,
}

const DEFAULT_FOOD: FoodPreference = FoodPreference {
    character: "the protagonist",
    item: "dango",
    food_type: "Sweets",
    context: "as a way to celebrate every mission",
};

const DEFAULT_TRADITION: TraditionMoment = TraditionMoment {
    context: "when the heroes pause to give thanks",
    concept: "a Shinto ritual asking for protection",
    distractors: [
        "a calligraphy class",
        "a karate demonstration",
        "a cooking contest",
    ],
    detail: "Many series show characters following everyday Shinto customs",
};

pub fn food_preference(anime_id: u64) -> &'static FoodPreference {
    match anime_id {
        1 => &FoodPreference {
            character: "Tanjiro",
            item: "mitarashi dango",
            food_type: "Sweets",
            context: "shares it with Nezuko in the market streets",
        },
        2 => &FoodPreference {
            character: "Thorfinn",
            item: "stuffed onigiri",
            food_type: "Savory food",
            context: "remembers the snacks he tried with Japanese merchants",
        },
        3 => &FoodPreference {
            character: "Riko",
            item: "dorayaki",
            food_type: "Sweets",
            context: "prepares it as a snack before descending into the Abyss",
        },
        4 => &FoodPreference {
            character: "Gojo",
            item: "taiyaki",
            food_type: "Sweets",
            context: "can't resist buying them between missions",
        },
        5 => &FoodPreference {
            character: "Dr. Tenma",
            item: "matcha tea",
            food_type: "Drinks",
            context: "uses it to remember his Japanese roots in the middle of Europe",
        },
        6 => &FoodPreference {
            character: "Winry",
            item: "steamed nikuman",
            food_type: "Savory food",
            context: "shares them with the Elric brothers after repairs",
        },
        _ => &DEFAULT_FOOD,
    }
}

pub fn tradition_moment(anime_id: u64) -> &'static TraditionMoment {
    match anime_id {
        1 => &TraditionMoment {
            context: "when Tanjiro remembers the Dance of the Fire God",
            concept: "a kagura dance dedicated to the kami",
            distractors: ["a summer matsuri", "a tea ceremony", "a hanami offering"],
            detail: "The Fire God Kagura is a ritual dance that honors the spirits",
        },
        2 => &TraditionMoment {
            context: "when the warriors share stories around the fire",
            concept: "a yorishiro tale to invoke protection",
            distractors: ["sumo practice", "a Tanabata parade", "kendo training"],
            detail: "Yorishiro are objects that draw the kami in to shelter those present",
        },
        3 => &TraditionMoment {
            context: "during the festivities the explorers recreate before descending",
            concept: "a small matsuri wishing for good fortune",
            distractors: ["a wedding ceremony", "a hanami gathering", "a black market auction"],
            detail: "Matsuri are held to ask local gods for protection and prosperity",
        },
        4 => &TraditionMoment {
            context: "when the students visit Kyoto for the exchange event",
            concept: "an offering at a Shinto shrine",
            distractors: ["a ninja initiation", "a Buddhist procession", "a snow festival"],
            detail: "The Kyoto arc shows temple prayers and omikuji offerings for luck",
        },
        5 => &TraditionMoment {
            context: "when Tenma remembers family gatherings in Japan",
            concept: "a tea ceremony to honor guests",
            distractors: ["a kagura ritual", "a Nebuta festival", "a kabuki play"],
            detail: "The tea ceremony stresses the harmony, respect and calm Tenma misses",
        },
        6 => &TraditionMoment {
            context: "when the Elric brothers look at the talismans of Ishval",
            concept: "an omamori used as a protective charm",
            distractors: ["a bonsai ornament", "an emakimono scroll", "a shamisen"],
            detail: "Omamori are obtained at temples and carried to wish for safe travels",
        },
        _ => &DEFAULT_TRADITION,
    }
}
