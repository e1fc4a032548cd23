//! Seed catalog inserted into empty tables.

use crate::environment::Environment;

/// One seed work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedBook {
    pub titulo: &'static str,
    pub autor: &'static str,
    pub anio: i32,
    pub genero: &'static str,
    pub isbn: &'static str,
    pub disponible: bool,
}

/// The four works every fresh catalog starts with.
///
/// *1984* starts on loan everywhere except production.
pub fn seed_books(environment: Environment) -> [SeedBook; 4] {
    [
        SeedBook {
            titulo: "Cien años de soledad",
            autor: "Gabriel García Márquez",
            anio: 1967,
            genero: "Ficción",
            isbn: "978-0307474728",
            disponible: true,
        },
        SeedBook {
            titulo: "Don Quijote de la Mancha",
            autor: "Miguel de Cervantes",
            anio: 1605,
            genero: "Clásico",
            isbn: "978-8424936464",
            disponible: true,
        },
        SeedBook {
            titulo: "1984",
            autor: "George Orwell",
            anio: 1949,
            genero: "Ciencia Ficción",
            isbn: "978-0451524935",
            disponible: environment == Environment::Production,
        },
        SeedBook {
            titulo: "El Principito",
            autor: "Antoine de Saint-Exupéry",
            anio: 1943,
            genero: "Infantil",
            isbn: "978-0156012195",
            disponible: true,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_seed_has_one_book_on_loan() {
        let seed = seed_books(Environment::Development);
        assert_eq!(seed.iter().filter(|b| !b.disponible).count(), 1);
        assert_eq!(seed.iter().find(|b| !b.disponible).map(|b| b.titulo), Some("1984"));
    }

    #[test]
    fn production_seed_is_fully_available() {
        assert!(seed_books(Environment::Production).iter().all(|b| b.disponible));
    }
}
