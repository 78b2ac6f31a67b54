use rand::seq::SliceRandom;

pub const FACTS: &[&str] = &[
    "A day on Venus is longer than a year on Venus.",
    "Neutron stars can spin over 600 times per second.",
    "Saturn could float in water due to its low density.",
    "There may be more trees on Earth than stars in the Milky Way.",
    "Astronauts grow taller in space due to spinal decompression.",
];

pub fn random_fact() -> &'static str {
    FACTS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or_default()
}
