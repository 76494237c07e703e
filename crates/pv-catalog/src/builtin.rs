use crate::{Asset, Category};
use pv_api_types::{AssetId, CategoryId};

struct Seed {
    id: &'static str,
    name: &'static str,
    emoji: &'static str,
    items: &'static [&'static str],
}

const SEEDS: &[Seed] = &[
    Seed {
        id: "scissors",
        name: "Scissors",
        emoji: "✂️",
        items: &[
            "Craft Scissors",
            "Pinking Shears",
            "Paper Edgers",
            "Safety Scissors",
            "Fabric Shears",
            "Detail Snips",
            "Wave Cutters",
            "Zigzag Blades",
            "Mini Snippers",
            "Thread Clippers",
            "Rotary Cutter",
            "Scallop Edgers",
            "Left-Hand Shears",
            "Deckle Cutters",
            "Precision Snips",
            "Spring Scissors",
            "Kitchen Shears",
            "Vintage Shears",
        ],
    },
    Seed {
        id: "paper",
        name: "Paper",
        emoji: "📄",
        items: &[
            "Kraft Sheet",
            "Vellum",
            "Washi Square",
            "Dot Grid Page",
            "Origami Stack",
            "Tissue Layer",
            "Cardstock",
            "Parchment",
            "Graph Page",
            "Tracing Sheet",
            "Rice Paper",
            "Newsprint",
            "Glitter Sheet",
            "Metallic Foil",
            "Watercolor Pad",
            "Sticky Note",
            "Index Card",
            "Envelope",
            "Post Card",
            "Gift Wrap",
            "Doily",
            "Corrugated Board",
            "Notebook Page",
            "Ledger Sheet",
        ],
    },
    Seed {
        id: "writing",
        name: "Writing",
        emoji: "✏️",
        items: &[
            "Pencil",
            "Fountain Pen",
            "Gel Pen",
            "Brush Pen",
            "Marker",
            "Highlighter",
            "Crayon",
            "Chalk",
            "Charcoal Stick",
            "Quill",
            "Ballpoint",
            "Fineliner",
            "Colored Pencil",
            "Paint Marker",
            "Calligraphy Nib",
            "Stylus",
            "Grease Pencil",
            "Oil Pastel",
            "Felt Tip",
            "Mechanical Pencil",
        ],
    },
    Seed {
        id: "tools",
        name: "Tools",
        emoji: "📐",
        items: &[
            "Ruler",
            "Protractor",
            "Compass",
            "Set Square",
            "Eraser",
            "Sharpener",
            "Stapler",
            "Hole Punch",
            "Paper Clip",
            "Glue Stick",
            "Tape Dispenser",
            "Bone Folder",
        ],
    },
    Seed {
        id: "decor",
        name: "Decor",
        emoji: "🎀",
        items: &[
            "Ribbon Bow",
            "Star Sticker",
            "Heart Sticker",
            "Sequin",
            "Button",
            "Pom Pom",
            "Feather",
            "Rhinestone",
            "Lace Trim",
            "Washi Roll",
            "Stamp",
            "Wax Seal",
            "Pressed Flower",
            "Confetti",
            "Bead Strand",
            "Glitter Pot",
            "Twine",
            "Tassel",
            "Charm",
            "Brad",
            "Eyelet",
            "Ink Pad",
            "Doodle Frame",
            "Banner Flag",
            "Tag",
            "Bookmark",
            "Badge",
            "Rosette",
            "Garland",
            "Snowflake",
        ],
    },
];

pub(crate) fn generate() -> (Vec<Category>, Vec<Asset>) {
    let categories = SEEDS
        .iter()
        .map(|seed| Category {
            id: CategoryId::from(seed.id),
            name: seed.name.to_owned(),
            emoji: Some(seed.emoji.to_owned()),
        })
        .collect();

    let assets = SEEDS
        .iter()
        .flat_map(|seed| {
            seed.items.iter().enumerate().map(move |(index, name)| Asset {
                id: AssetId(format!("{}-{:02}", seed.id, index + 1)),
                name: (*name).to_owned(),
                category: CategoryId::from(seed.id),
                emoji: Some(seed.emoji.to_owned()),
                price: None,
            })
        })
        .collect();

    (categories, assets)
}
