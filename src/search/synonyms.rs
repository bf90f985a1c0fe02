//! Static synonym tables used for query expansion. Read-only after
//! initialization, safe to share across request handlers.

use std::collections::HashMap;

use lazy_static::lazy_static;

lazy_static! {
    /// Fragrance family to representative notes.
    pub static ref FRAGRANCE_FAMILIES: HashMap<&'static str, Vec<&'static str>> = {
        let mut map = HashMap::new();
        map.insert(
            "floral",
            vec![
                "rose", "jasmine", "lavender", "lily", "peony", "gardenia", "violet", "iris",
                "tuberose", "ylang",
            ],
        );
        map.insert(
            "woody",
            vec!["cedar", "sandalwood", "oak", "pine", "vetiver", "patchouli", "oud", "agarwood"],
        );
        map.insert(
            "citrus",
            vec!["lemon", "orange", "bergamot", "grapefruit", "lime", "mandarin", "tangerine"],
        );
        map.insert(
            "oriental",
            vec!["vanilla", "amber", "musk", "spice", "incense", "cinnamon", "cardamom"],
        );
        map.insert(
            "fresh",
            vec!["aquatic", "marine", "green", "clean", "crisp", "water", "ocean"],
        );
        map.insert(
            "fruity",
            vec!["apple", "peach", "berry", "pear", "plum", "cherry", "tropical"],
        );
        map.insert("spicy", vec!["pepper", "ginger", "clove", "nutmeg", "saffron"]);
        map.insert("sweet", vec!["honey", "caramel", "chocolate", "sugar", "gourmand"]);
        map
    };

    /// Common perfume jargon and related terms.
    pub static ref PERFUME_SYNONYMS: HashMap<&'static str, Vec<&'static str>> = {
        let mut map = HashMap::new();
        map.insert(
            "perfume",
            vec![
                "fragrance", "scent", "cologne", "eau de parfum", "edp", "eau de toilette", "edt",
            ],
        );
        map.insert("smell", vec!["scent", "fragrance", "aroma", "odor"]);
        map.insert("strong", vec!["intense", "powerful", "bold", "concentrated"]);
        map.insert("light", vec!["subtle", "delicate", "soft", "gentle"]);
        map.insert("long", vec!["lasting", "longlasting", "durable", "persistent"]);
        map.insert("men", vec!["masculine", "male", "homme", "for him"]);
        map.insert("women", vec!["feminine", "female", "femme", "for her"]);
        map.insert("luxury", vec!["premium", "high-end", "expensive", "designer"]);
        map.insert("cheap", vec!["affordable", "budget", "inexpensive", "economical"]);
        map
    };

    /// Brand abbreviation to full brand name.
    pub static ref BRAND_ALIASES: HashMap<&'static str, &'static str> = {
        let mut map = HashMap::new();
        map.insert("ysl", "Yves Saint Laurent");
        map.insert("ck", "Calvin Klein");
        map.insert("dg", "Dolce & Gabbana");
        map.insert("jpg", "Jean Paul Gaultier");
        map.insert("tom ford", "Tom Ford");
        map.insert("armani", "Giorgio Armani");
        map
    };
}
