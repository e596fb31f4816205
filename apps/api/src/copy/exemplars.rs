//! Brand-voice exemplars: sample sentences rotated into every prompt to steer tone.

use rand::seq::SliceRandom;
use rand::Rng;

const BRAND_VOICE: &[&str] = &[
    "Experience casual comfort and style with our loose fit jeans, the perfect addition to your everyday wardrobe.",
    "This button-up shirt features a subtle dobby stripe for a touch of texture and a modern silhouette.",
    "Step out in style with this classic quilted jacket: warm, versatile, and effortlessly cool.",
    "Embrace effortless style with this raw edge relaxed fit tee, a wardrobe staple for everyday wear.",
    "Adjustable cap for a customisable fit with logo detail; everyday comfort meets low-key statement.",
    "Embrace laid-back luxury with these mid-rise straight-leg trousers, crafted from breathable linen for all-day ease.",
    "Elevate your look with this double-breasted wool blazer, where a tailored fit meets timeless sophistication.",
    "Slip into comfort with our ultra-soft modal lounge tee; a relaxed silhouette and scoop neckline make it a weekend go-to.",
    "Layer up with this chunky cable-knit cardigan, with patch pockets that pair warmth with modern flair.",
    "Make a statement in this satin wrap dress, with a draped waist and asymmetric hem that take you from desk to dinner.",
    "Step into season-ready style with these leather-trimmed suede sneakers and their cushioned sole.",
    "Add edge to any outfit with this distressed denim jacket; an oversized fit and raw-edge cuffs deliver carefree cool.",
    "Stay sleek and dry with this water-resistant trench coat, its belted waist defining a polished look.",
    "Complement your wardrobe with our silk-blend button-down, its subtle sheen perfect for smart-casual days.",
    "Keep it minimal in these tailored drawstring joggers, balancing stretch-cotton comfort with refinement.",
    "Channel retro vibes in this high-waisted corduroy skirt, rich in texture with a button-front design.",
    "Go sporty-chic with these water-repellent track pants, finished with side stripes and an elasticated waist.",
    "Opt for bohemian flair in this embroidered peasant blouse, with delicate lace trim and a flowing silhouette.",
    "Commit to clean lines in this minimalist shift dress, a sleek cut in a neutral tone for modern elegance.",
    "Discover eco-conscious style with this recycled denim jacket, lined in organic cotton.",
    "Stand out in this bold geometric-print bomber jacket, with vibrant colour and fitted cuffs.",
    "Achieve timeless sophistication with this tailored houndstooth blazer and its structured shoulders.",
    "Embrace playful charm in these polka-dot culottes, a wide leg and high waist for flattering movement.",
    "Bring urban edge with this faux-leather moto vest, finished with an asymmetric zip and snap collar.",
    "Enjoy coastal ease in this lightweight linen button-up, breathable and relaxed for sunny days by the sea.",
    "Celebrate artisanal craft in this hand-knit wool poncho, with intricate stitching and a fringed hem.",
    "Add a futuristic twist with these reflective joggers, made from technical fabric with zip pockets.",
    "Showcase preppy style in this striped pique polo, with contrast tipping and a three-button placket.",
    "Capture evening elegance in this velvet tuxedo jacket, with sleek satin lapels and a single-button closure.",
    "Embody laid-back athleisure in this performance hoodie, in a moisture-wicking blend for everyday comfort.",
    "Step up in statement sneakers, with a chunky sole and mixed-material upper for head-turning street style.",
    "Slip into modern minimalism with this asymmetric tunic, with sculptural draping in a monochrome palette.",
];

/// A fixed pool of brand-voice sentences, sampled without replacement per prompt.
#[derive(Debug, Clone)]
pub struct ExemplarPool {
    lines: Vec<String>,
}

impl Default for ExemplarPool {
    fn default() -> Self {
        Self::new(BRAND_VOICE.iter().map(|s| s.to_string()).collect())
    }
}

impl ExemplarPool {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Draws `count` distinct exemplars (fewer if the pool is smaller).
    pub fn sample<'a, R: Rng + ?Sized>(&'a self, rng: &mut R, count: usize) -> Vec<&'a str> {
        self.lines
            .choose_multiple(rng, count)
            .map(String::as_str)
            .collect()
    }
}
