use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::request::{Category, Language};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Supporter {
    pub id: Uuid,
    pub name: String,
    pub age: u8,
    pub interests: Vec<String>,
    pub languages: Vec<Language>,
    pub categories: Vec<Category>,
    pub distance_km: f32,
    pub rating: f32,
    pub completed_sessions: u32,
    pub bio: String,
    pub verified: bool,
    /// Fixed compatibility figure shown by the static scorer.
    pub base_match: u8,
    pub response_delay_mins: u32,
}

/// The supporters every request is offered to.
pub fn demo_roster() -> Vec<Supporter> {
    vec![
        Supporter {
            id: Uuid::from_u128(0x6f1c_0001_0000_4000_8000_0000_0000_0001),
            name: "Arjun Patel".to_string(),
            age: 32,
            interests: vec!["Coffee".into(), "Books".into(), "Music".into()],
            languages: vec![Language::English, Language::Hindi],
            categories: vec![Category::Coffee, Category::Outing, Category::Hobby],
            distance_km: 0.5,
            rating: 4.8,
            completed_sessions: 15,
            bio: "Love meeting new people and helping out. Great listener and always up for a good conversation!".to_string(),
            verified: true,
            base_match: 94,
            response_delay_mins: 2,
        },
        Supporter {
            id: Uuid::from_u128(0x6f1c_0001_0000_4000_8000_0000_0000_0002),
            name: "Sneha Reddy".to_string(),
            age: 27,
            interests: vec!["Photography".into(), "Travel".into(), "Cooking".into()],
            languages: vec![Language::English, Language::Tamil],
            categories: vec![Category::Meals, Category::Outing, Category::Household],
            distance_km: 1.2,
            rating: 4.9,
            completed_sessions: 23,
            bio: "Friendly and empathetic. Love helping others and making meaningful connections.".to_string(),
            verified: true,
            base_match: 89,
            response_delay_mins: 5,
        },
        Supporter {
            id: Uuid::from_u128(0x6f1c_0001_0000_4000_8000_0000_0000_0003),
            name: "Karan Singh".to_string(),
            age: 35,
            interests: vec!["Sports".into(), "Movies".into(), "Technology".into()],
            languages: vec![Language::English, Language::Hindi, Language::Bengali],
            categories: vec![Category::Transportation, Category::Hobby, Category::Household],
            distance_km: 2.1,
            rating: 4.7,
            completed_sessions: 12,
            bio: "Tech enthusiast who enjoys meaningful conversations. Happy to lend a helping hand!".to_string(),
            verified: false,
            base_match: 82,
            response_delay_mins: 8,
        },
    ]
}
