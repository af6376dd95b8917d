//! Starting character classes.

use super::types::CharacterStats;

/// Class definition: name, starting stats, and the buff it advertises.
#[derive(Debug, Clone, Copy)]
pub struct ClassDef {
    pub name: &'static str,
    pub hp: u32,
    pub speed: u32,
    pub damage: u32,
    pub armor: u32,
    pub buff: &'static str,
}

pub const CLASSES: [ClassDef; 5] = [
    ClassDef {
        name: "Mage",
        hp: 55,
        speed: 75,
        damage: 85,
        armor: 35,
        buff: "+20% armor penetration",
    },
    ClassDef {
        name: "Tanker",
        hp: 90,
        speed: 30,
        damage: 50,
        armor: 80,
        buff: "+10% damage reduction",
    },
    ClassDef {
        name: "Fighter",
        hp: 70,
        speed: 50,
        damage: 65,
        armor: 65,
        buff: "+15% crit chance on first hit",
    },
    ClassDef {
        name: "Assassin",
        hp: 55,
        speed: 90,
        damage: 80,
        armor: 25,
        buff: "+15% lifesteal",
    },
    ClassDef {
        name: "Archer",
        hp: 75,
        speed: 70,
        damage: 60,
        armor: 45,
        buff: "+25% crit damage",
    },
];

/// Look up a class by name, case-insensitively.
pub fn find_class(name: &str) -> Option<&'static ClassDef> {
    let name = name.trim();
    CLASSES.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

impl ClassDef {
    pub fn starting_stats(&self) -> CharacterStats {
        CharacterStats {
            hp: self.hp,
            speed: self.speed,
            damage: self.damage,
            armor: self.armor,
            buff: Some(self.buff.to_string()),
        }
    }
}
