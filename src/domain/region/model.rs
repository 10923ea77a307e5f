/// Tunisian governorate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub id: i32,
    pub name: String,
}

/// Seed data for the region list, in display order.
pub const GOVERNORATES: [&str; 24] = [
    "Ariana",
    "Béja",
    "Ben Arous",
    "Bizerte",
    "Gabès",
    "Gafsa",
    "Jendouba",
    "Kairouan",
    "Kasserine",
    "Kébili",
    "Le Kef",
    "Mahdia",
    "La Manouba",
    "Médenine",
    "Monastir",
    "Nabeul",
    "Sfax",
    "Sidi Bouzid",
    "Siliana",
    "Sousse",
    "Tataouine",
    "Tozeur",
    "Tunis",
    "Zaghouan",
];
