use anyhow::Context;
use sqlx::AnyPool;
use tracing::info;

use crate::{
    people::{Character, NewCharacter},
    planets::{NewPlanet, Planet},
    users::{password::hash_password, User},
};

fn text(s: &str) -> Option<String> {
    Some(s.to_string())
}

/// Populate an empty database with a demo user and a small catalog.
///
/// The first inserted user gets id 1, the default acting user. Does nothing
/// once any user exists.
pub async fn seed_demo_data(db: &AnyPool) -> anyhow::Result<()> {
    if !User::list_all(db).await?.is_empty() {
        info!("database already populated; skipping demo seed");
        return Ok(());
    }

    let mut tx = db.begin().await?;

    User::create(&mut *tx, "demo@example.com", &hash_password("demo-password")?, true)
        .await
        .context("seed demo user")?;
    User::create(&mut *tx, "retired@example.com", &hash_password("retired-password")?, false)
        .await
        .context("seed inactive user")?;

    let characters = [
        ("Luke Skywalker", "male", "19BBY", "172", "77", "blond", "blue"),
        ("Leia Organa", "female", "19BBY", "150", "49", "brown", "brown"),
        ("Darth Vader", "male", "41.9BBY", "202", "136", "none", "yellow"),
        ("R2-D2", "n/a", "33BBY", "96", "32", "n/a", "red"),
    ];
    for (name, gender, birth_year, height, mass, hair_color, eye_color) in characters {
        Character::create(
            &mut *tx,
            NewCharacter {
                name: name.into(),
                gender: text(gender),
                birth_year: text(birth_year),
                height: text(height),
                mass: text(mass),
                hair_color: text(hair_color),
                eye_color: text(eye_color),
            },
        )
        .await
        .with_context(|| format!("seed character {name}"))?;
    }

    let planets = [
        ("Tatooine", "arid", "desert", "200000", "10465", "1 standard"),
        ("Alderaan", "temperate", "grasslands, mountains", "2000000000", "12500", "1 standard"),
        ("Hoth", "frozen", "tundra, ice caves", "unknown", "7200", "1.1 standard"),
    ];
    for (name, climate, terrain, population, diameter, gravity) in planets {
        Planet::create(
            &mut *tx,
            NewPlanet {
                name: name.into(),
                climate: text(climate),
                terrain: text(terrain),
                population: text(population),
                diameter: text(diameter),
                gravity: text(gravity),
            },
        )
        .await
        .with_context(|| format!("seed planet {name}"))?;
    }

    tx.commit().await?;
    info!(
        characters = characters.len(),
        planets = planets.len(),
        "seeded demo data"
    );
    Ok(())
}
