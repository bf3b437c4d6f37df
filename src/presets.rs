//! Built-in content: starter slides, the demo deck, filter presets and the
//! abstract shape catalog.

use std::sync::LazyLock;

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;

use crate::constants;
use crate::model::{
    AnimationIn, Background, Element, ElementKind, Point, Size, Slide,
};

/// Background every new slide starts with.
pub const DEFAULT_BACKGROUND: &str = "linear-gradient(to bottom right, #000000, #1a1a1a)";

/// A named filter chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterPreset {
    /// Display name.
    pub name: &'static str,
    /// Filter expression stored on the element.
    pub value: &'static str,
}

/// A named shape from the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedShape {
    /// Display name.
    pub name: &'static str,
    /// SVG fragment in a 100x100 view box.
    pub markup: &'static str,
}

/// Filter presets offered for media elements.
pub const FILTERS: &[FilterPreset] = &[
    FilterPreset { name: "None", value: "none" },
    FilterPreset { name: "Cinematic", value: "contrast(1.2) saturate(0.8) brightness(1.1)" },
    FilterPreset { name: "Vintage", value: "sepia(0.5) contrast(0.9) brightness(0.9)" },
    FilterPreset { name: "Noir", value: "grayscale(1) contrast(1.2)" },
    FilterPreset { name: "Vibrant", value: "saturate(1.8) contrast(1.1)" },
    FilterPreset { name: "Dreamy", value: "brightness(1.1) blur(1px) saturate(1.2)" },
    FilterPreset { name: "Cool", value: "hue-rotate(180deg) saturate(0.8)" },
    FilterPreset { name: "Warm", value: "sepia(0.3) hue-rotate(-30deg) saturate(1.2)" },
    FilterPreset { name: "Invert", value: "invert(1)" },
];

static MATCHER: LazyLock<SkimMatcherV2> = LazyLock::new(SkimMatcherV2::default);

/// Find a shape by name: exact (case-insensitive) first, then best fuzzy match.
pub fn find_shape(query: &str) -> Option<&'static NamedShape> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Some(exact) = SHAPES.iter().find(|s| s.name.eq_ignore_ascii_case(query)) {
        return Some(exact);
    }
    SHAPES
        .iter()
        .filter_map(|s| MATCHER.fuzzy_match(s.name, query).map(|score| (score, s)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, s)| s)
}

/// Find a filter preset by name: exact (case-insensitive) first, then fuzzy.
pub fn find_filter(query: &str) -> Option<&'static FilterPreset> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    if let Some(exact) = FILTERS.iter().find(|f| f.name.eq_ignore_ascii_case(query)) {
        return Some(exact);
    }
    FILTERS
        .iter()
        .filter_map(|f| MATCHER.fuzzy_match(f.name, query).map(|score| (score, f)))
        .max_by_key(|(score, _)| *score)
        .map(|(_, f)| f)
}

fn starter(kind: ElementKind, at: (f64, f64), size: (f64, f64), z: i64, color: &str, anim: AnimationIn) -> Element {
    let mut el = Element::new(kind, Point::new(at.0, at.1), Size::new(size.0, size.1), z);
    el.style.color = Some(color.to_string());
    el.animation_in = anim;
    el
}

fn text(kind: fn(String) -> ElementKind, content: &str) -> ElementKind {
    kind(content.to_string())
}

fn title(t: String) -> ElementKind {
    ElementKind::Title { text: t }
}

fn description(t: String) -> ElementKind {
    ElementKind::Description { text: t }
}

fn value(t: String) -> ElementKind {
    ElementKind::Value { text: t }
}

fn metric(t: String) -> ElementKind {
    ElementKind::Metric { text: t }
}

fn plain(t: String) -> ElementKind {
    ElementKind::Text { text: t }
}

/// The element set a new slide starts with. All sit below the initial watermark.
pub fn starter_elements() -> Vec<Element> {
    vec![
        starter(text(title, "Total Impressions"), (50.0, 100.0), (600.0, 80.0), 10, "#ffffff", AnimationIn::Fade),
        starter(
            text(description, "Your ads appeared enough times to fill Wembley Stadium 50x over"),
            (50.0, 180.0),
            (500.0, 60.0),
            9,
            "#ffffff",
            AnimationIn::Fade,
        ),
        starter(text(value, "247M impressions"), (50.0, 280.0), (350.0, 120.0), 8, "#10b981", AnimationIn::ScaleUp),
        starter(text(metric, "+42% vs 2024"), (50.0, 420.0), (150.0, 50.0), 7, "#ffffff", AnimationIn::SlideLeft),
        starter(text(metric, "Avg CTR 3.8%"), (210.0, 420.0), (150.0, 50.0), 6, "#ffffff", AnimationIn::SlideLeft),
        starter(text(metric, "42 markets reached"), (370.0, 420.0), (180.0, 50.0), 5, "#ffffff", AnimationIn::SlideLeft),
    ]
}

/// A fresh slide: default gradient, default duration, starter elements.
pub fn new_slide() -> Slide {
    let mut slide = Slide::new(
        Background::gradient(DEFAULT_BACKGROUND),
        constants::playback::DEFAULT_DURATION_SECS,
    );
    slide.elements = starter_elements();
    slide
}

/// The three-slide demo deck.
pub fn demo_slides() -> Vec<Slide> {
    let duration = constants::playback::DEFAULT_DURATION_SECS;

    let mut metrics = Slide::new(Background::gradient(DEFAULT_BACKGROUND), duration);
    metrics.elements = vec![
        starter(text(title, "Metric Focus (Impressions)"), (50.0, 50.0), (800.0, 100.0), 10, "#ffffff", AnimationIn::Fade),
        starter(text(value, "247M"), (50.0, 150.0), (400.0, 150.0), 9, "#10b981", AnimationIn::ScaleUp),
        starter(
            text(description, "\"Your ads appeared enough times to fill Wembley Stadium 50x over\""),
            (50.0, 320.0),
            (600.0, 80.0),
            8,
            "#ffffff",
            AnimationIn::Fade,
        ),
        starter(text(plain, "Google Ads + Meta Ads combined"), (50.0, 420.0), (300.0, 40.0), 7, "#ffffff", AnimationIn::Fade),
        starter(text(metric, "+42% vs 2024"), (50.0, 500.0), (150.0, 50.0), 6, "#ffffff", AnimationIn::SlideLeft),
        starter(text(metric, "Avg CTR 3.8%"), (210.0, 500.0), (150.0, 50.0), 5, "#ffffff", AnimationIn::SlideLeft),
        starter(text(metric, "42 markets reached"), (370.0, 500.0), (180.0, 50.0), 4, "#ffffff", AnimationIn::SlideLeft),
    ];

    let mut campaigns = Slide::new(
        Background::gradient("linear-gradient(to bottom right, #2e1065, #000000)"),
        duration,
    );
    let mut photo = Element::new(
        ElementKind::Image { url: "https://picsum.photos/1920/1080?random=1".to_string() },
        Point::new(400.0, 50.0),
        Size::new(500.0, 300.0),
        5,
    );
    photo.animation_in = AnimationIn::Fade;
    let mut total = starter(
        text(plain, "TOTAL: 9 launches | $4.7M pipeline impact"),
        (50.0, 540.0),
        (500.0, 40.0),
        7,
        "#ffffff",
        AnimationIn::Fade,
    );
    total.style.background_color = Some("#ffffff10".to_string());
    total.style.padding = Some(10.0);
    total.style.border_radius = Some(8.0);
    campaigns.elements = vec![
        photo,
        starter(
            text(title, "9 major campaigns that drove your biggest wins"),
            (50.0, 50.0),
            (300.0, 200.0),
            10,
            "#ffffff",
            AnimationIn::SlideLeft,
        ),
        starter(text(value, "Q3 SaaS Launch"), (50.0, 380.0), (400.0, 100.0), 9, "#8b5cf6", AnimationIn::ScaleUp),
        starter(
            text(plain, "1.8M visits | 12.4% CR | $2.1M pipeline"),
            (50.0, 480.0),
            (500.0, 40.0),
            8,
            "#ffffff",
            AnimationIn::Fade,
        ),
        total,
    ];

    let mut events = Slide::new(
        Background::gradient("linear-gradient(to bottom right, #064e3b, #000000)"),
        duration,
    );
    let clip = Element::new(
        ElementKind::Video {
            url: "https://assets.mixkit.co/videos/preview/mixkit-stars-in-the-night-sky-loop-4006-large.mp4"
                .to_string(),
        },
        Point::new(50.0, 50.0),
        Size::new(400.0, 250.0),
        5,
    );
    let mut cities = starter(
        text(plain, "London (847) | NY (523) | Berlin (312) | etc."),
        (50.0, 500.0),
        (800.0, 60.0),
        7,
        "#ffffff",
        AnimationIn::Fade,
    );
    cities.style.background_color = Some("#00000040".to_string());
    cities.style.padding = Some(20.0);
    cities.style.border_radius = Some(12.0);
    cities.style.box_shadow = Some("0 0 20px rgba(16, 185, 129, 0.3)".to_string());
    events.elements = vec![
        clip,
        starter(
            text(title, "5 in-person events that built your strongest relationships"),
            (500.0, 50.0),
            (400.0, 200.0),
            10,
            "#ffffff",
            AnimationIn::SlideRight,
        ),
        starter(text(value, "London Growth Summit"), (500.0, 280.0), (400.0, 100.0), 9, "#10b981", AnimationIn::ScaleUp),
        starter(
            text(plain, "847 attendees | 92% NPS | 47 leads"),
            (500.0, 380.0),
            (400.0, 40.0),
            8,
            "#ffffff",
            AnimationIn::Fade,
        ),
        cities,
    ];

    vec![metrics, campaigns, events]
}

/// Abstract shape catalog.
pub const SHAPES: &[NamedShape] = &[
    NamedShape {
        name: "Circle",
        markup: r#"<circle cx="50" cy="50" r="40" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Square",
        markup: r#"<rect x="10" y="10" width="80" height="80" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Triangle",
        markup: r#"<polygon points="50,10 90,90 10,90" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Line",
        markup: r#"<rect x="10" y="48" width="80" height="4" fill="currentColor" rx="2" />"#,
    },
    NamedShape {
        name: "Dashed Line",
        markup: r#"<line x1="0" y1="50" x2="100" y2="50" stroke="currentColor" stroke-width="4" stroke-dasharray="10,10" />"#,
    },
    NamedShape {
        name: "Blob",
        markup: r#"<path d="M44.7,-76.4C58.1,-69.2,69.2,-58.1,76.4,-44.7C83.6,-31.3,86.9,-15.7,86.2,-0.4C85.5,14.9,80.8,29.8,72.2,42.5C63.6,55.2,51.1,65.7,37.1,72.3C23.1,78.9,7.6,81.6,-7.4,80.3C-22.4,79,-36.9,73.7,-49.6,65.1C-62.3,56.5,-73.2,44.6,-79.1,30.8C-85,17,-85.9,1.3,-82.9,-13.4C-79.9,-28.1,-73,-41.8,-62.7,-52.4C-52.4,-63,-38.7,-70.5,-24.8,-75.4C-10.9,-80.3,3.2,-82.6,17.4,-80.6C31.6,-78.6,44.7,-76.4,44.7,-76.4Z" transform="translate(50 50)" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Star",
        markup: r#"<path d="M50 10L61.8 34.1L88.2 37.9L69.1 56.5L73.6 82.7L50 70.3L26.4 82.7L30.9 56.5L11.8 37.9L38.2 34.1L50 10Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Ring",
        markup: r#"<path d="M50 10C27.9 10 10 27.9 10 50C10 72.1 27.9 90 50 90C72.1 90 90 72.1 90 50C90 27.9 72.1 10 50 10ZM50 80C33.4 80 20 66.6 20 50C20 33.4 33.4 20 50 20C66.6 20 80 33.4 80 50C80 66.6 66.6 80 50 80Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Wave",
        markup: r#"<path d="M0 50C20 30 30 70 50 50C70 30 80 70 100 50V60H0V50Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Hexagon",
        markup: r#"<polygon points="50,10 85,30 85,70 50,90 15,70 15,30" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Diamond",
        markup: r#"<polygon points="50,10 90,50 50,90 10,50" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Heart",
        markup: r#"<path d="M50 85C50 85 10 55 10 30C10 15 25 10 35 20C40 25 50 35 50 35C50 35 60 25 65 20C75 10 90 15 90 30C90 55 50 85 50 85Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Arrow",
        markup: r#"<path d="M10 50H90M90 50L60 20M90 50L60 80" stroke="currentColor" stroke-width="8" fill="none" stroke-linecap="round" stroke-linejoin="round" />"#,
    },
    NamedShape {
        name: "Plus",
        markup: r#"<path d="M50 10V90M10 50H90" stroke="currentColor" stroke-width="8" fill="none" stroke-linecap="round" />"#,
    },
    NamedShape {
        name: "Cross",
        markup: r#"<path d="M20 20L80 80M80 20L20 80" stroke="currentColor" stroke-width="8" fill="none" stroke-linecap="round" />"#,
    },
    NamedShape {
        name: "Cloud",
        markup: r#"<path d="M25 70C15 70 10 60 10 50C10 35 25 30 30 30C35 15 55 10 70 20C85 30 90 50 80 65C75 75 60 80 50 80H25V70Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Moon",
        markup: r#"<path d="M80 70C60 85 30 75 20 50C15 30 25 10 45 5C30 15 30 45 50 60C65 70 85 65 95 55C90 65 85 70 80 70Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Sun",
        markup: r#"<circle cx="50" cy="50" r="20" fill="currentColor" /><path d="M50 10V25M50 75V90M10 50H25M75 50H90M22 22L33 33M67 67L78 78M22 78L33 67M67 33L78 22" stroke="currentColor" stroke-width="4" />"#,
    },
    NamedShape {
        name: "Zigzag",
        markup: r#"<path d="M10 20L30 80L50 20L70 80L90 20" stroke="currentColor" stroke-width="4" fill="none" />"#,
    },
    NamedShape {
        name: "Spiral",
        markup: r#"<path d="M50 50C50 50 55 45 55 40C55 30 40 25 30 35C20 45 25 65 45 70C65 75 85 55 80 30C75 5 40 0 15 20" stroke="currentColor" stroke-width="2" fill="none" />"#,
    },
    NamedShape {
        name: "Leaf",
        markup: r#"<path d="M10 90C10 90 10 40 50 10C90 40 90 90 50 90C50 90 10 90 10 90Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Cylinder",
        markup: r#"<ellipse cx="50" cy="20" rx="30" ry="10" fill="currentColor" /><rect x="20" y="20" width="60" height="50" fill="currentColor" /><ellipse cx="50" cy="70" rx="30" ry="10" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Cone",
        markup: r#"<path d="M50 10L15 80C15 80 15 90 50 90C85 90 85 80 85 80L50 10Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Capsule",
        markup: r#"<rect x="20" y="30" width="60" height="40" rx="20" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Trapezoid",
        markup: r#"<polygon points="30,20 70,20 90,80 10,80" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Parallelogram",
        markup: r#"<polygon points="30,20 90,20 70,80 10,80" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Pentagon",
        markup: r#"<polygon points="50,10 90,40 75,85 25,85 10,40" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Octagon",
        markup: r#"<polygon points="35,10 65,10 90,35 90,65 65,90 35,90 10,65 10,35" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Shield",
        markup: r#"<path d="M10 20V50C10 75 50 90 50 90C50 90 90 75 90 50V20H10Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Burst",
        markup: r#"<path d="M50 10L55 35L80 30L65 50L90 65L65 70L70 95L50 80L30 95L35 70L10 65L35 50L20 30L45 35L50 10Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Gear",
        markup: r#"<path d="M50 35C41.7 35 35 41.7 35 50C35 58.3 41.7 65 50 65C58.3 65 65 58.3 65 50C65 41.7 58.3 35 50 35ZM50 10L55 20H45L50 10ZM90 50L80 55V45L90 50ZM50 90L45 80H55L50 90ZM10 50L20 45V55L10 50Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Tag",
        markup: r#"<path d="M10 50L40 10H90V90H40L10 50ZM30 50C30 55.5 25.5 60 20 60C14.5 60 10 55.5 10 50C10 44.5 14.5 40 20 40C25.5 40 30 44.5 30 50Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Bookmark",
        markup: r#"<path d="M20 10H80V90L50 70L20 90V10Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Ticket",
        markup: r#"<path d="M10 30C20 30 20 40 20 50C20 60 20 70 10 70V90H90V70C80 70 80 60 80 50C80 40 80 30 90 30V10H10V30Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Speech",
        markup: r#"<path d="M10 20H90V70H50L20 90V70H10V20Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Puzzle",
        markup: r#"<path d="M40 10C40 15 45 20 50 20C55 20 60 15 60 10H80V30C75 30 70 35 70 40C70 45 75 50 80 50V70H60C60 65 55 60 50 60C45 60 40 65 40 70H20V50C25 50 30 45 30 40C30 35 25 30 20 30V10H40Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Keyhole",
        markup: r#"<circle cx="50" cy="35" r="15" fill="currentColor" /><path d="M40 50L30 85H70L60 50H40Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Eye",
        markup: r#"<path d="M10 50C10 50 30 20 50 20C70 20 90 50 90 50C90 50 70 80 50 80C30 80 10 50 10 50ZM50 65C58.3 65 65 58.3 65 50C65 41.7 58.3 35 50 35C41.7 35 35 41.7 35 50C35 58.3 41.7 65 50 65Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Infinity",
        markup: r#"<path d="M30 35C15 35 15 65 30 65C40 65 45 55 50 50C55 45 60 35 70 35C85 35 85 65 70 65C60 65 55 55 50 50C45 45 40 35 30 35Z" stroke="currentColor" stroke-width="8" fill="none" />"#,
    },
    NamedShape {
        name: "YinYang",
        markup: r#"<circle cx="50" cy="50" r="40" stroke="currentColor" stroke-width="2" fill="none" /><path d="M50 10C72.1 10 90 27.9 90 50C90 72.1 72.1 90 50 90C50 90 50 70 50 70C61 70 70 61 70 50C70 39 61 30 50 30C50 30 50 10 50 10Z" fill="currentColor" /><circle cx="50" cy="30" r="5" fill="currentColor" /><circle cx="50" cy="70" r="5" fill="white" />"#,
    },
    NamedShape {
        name: "Atom",
        markup: r#"<circle cx="50" cy="50" r="8" fill="currentColor" /><ellipse cx="50" cy="50" rx="40" ry="15" stroke="currentColor" stroke-width="2" fill="none" /><ellipse cx="50" cy="50" rx="40" ry="15" stroke="currentColor" stroke-width="2" fill="none" transform="rotate(60 50 50)" /><ellipse cx="50" cy="50" rx="40" ry="15" stroke="currentColor" stroke-width="2" fill="none" transform="rotate(120 50 50)" />"#,
    },
    NamedShape {
        name: "Flask",
        markup: r#"<path d="M40 10H60V30L85 80C85 80 90 90 50 90C10 90 15 80 15 80L40 30V10Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Bolt",
        markup: r#"<polygon points="60,10 20,55 45,55 40,90 80,45 55,45" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Umbrella",
        markup: r#"<path d="M50 10C25 10 10 30 10 50H90C90 30 75 10 50 10ZM50 50V80C50 85 45 90 40 90" stroke="currentColor" stroke-width="4" fill="none" />"#,
    },
    NamedShape {
        name: "Anchor",
        markup: r#"<path d="M50 10V70M20 50C20 70 50 90 50 90C50 90 80 70 80 50M40 20H60" stroke="currentColor" stroke-width="4" fill="none" />"#,
    },
    NamedShape {
        name: "Flag",
        markup: r#"<path d="M20 10V90M20 20H80L65 40L80 60H20" stroke="currentColor" stroke-width="4" fill="none" />"#,
    },
    NamedShape {
        name: "Bell",
        markup: r#"<path d="M50 10C35 10 25 25 25 45V70H75V45C75 25 65 10 50 10ZM40 70C40 75 45 80 50 80C55 80 60 75 60 70" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Gift",
        markup: r#"<rect x="20" y="40" width="60" height="50" fill="currentColor" /><rect x="15" y="30" width="70" height="15" fill="currentColor" /><path d="M50 10C40 10 35 20 50 30C65 20 60 10 50 10Z" fill="currentColor" />"#,
    },
    NamedShape {
        name: "Coffee",
        markup: r#"<path d="M20 30H70V70C70 85 20 85 20 70V30ZM70 40H85C85 55 70 55 70 40Z" stroke="currentColor" stroke-width="4" fill="none" />"#,
    },
];
