//! Starter catalog data, inserted on first boot when the tables are empty.

use crate::{
  entity::{achievement, challenge::Difficulty, quote},
  prelude::*,
  sv,
};

pub async fn run(db: &DatabaseConnection) -> Result<()> {
  seed_challenges(db).await?;
  seed_quotes(db).await?;
  seed_achievements(db).await?;
  Ok(())
}

async fn seed_challenges(db: &DatabaseConnection) -> Result<()> {
  let sv = sv::Challenge::new(db);
  if sv.count().await? > 0 {
    return Ok(());
  }

  info!("Seeding challenge catalog");

  let catalog = [
    (
      "24h bez social media",
      "Spędź całą dobę bez otwierania żadnego portalu społecznościowego.",
      1,
      Difficulty::Easy,
      100,
    ),
    (
      "Weekend offline",
      "Od piątkowego wieczora do niedzieli trzymaj telefon w trybie samolotowym.",
      2,
      Difficulty::Medium,
      250,
    ),
    (
      "Poranek bez ekranu",
      "Przez trzy dni nie sięgaj po telefon przez pierwszą godzinę po przebudzeniu.",
      3,
      Difficulty::Easy,
      150,
    ),
    (
      "Wieczorny detoks",
      "Przez pięć dni odkładaj wszystkie ekrany na godzinę przed snem.",
      5,
      Difficulty::Medium,
      300,
    ),
    (
      "Tydzień minimalizmu cyfrowego",
      "Siedem dni tylko z niezbędnymi aplikacjami; resztę odinstaluj lub ukryj.",
      7,
      Difficulty::Hard,
      500,
    ),
  ];

  for (title, description, days, difficulty, points) in catalog {
    sv.create(title, description, days, difficulty, points).await?;
  }

  Ok(())
}

async fn seed_quotes(db: &DatabaseConnection) -> Result<()> {
  if sv::Quote::new(db).count().await? > 0 {
    return Ok(());
  }

  info!("Seeding quotes");

  let quotes = [
    ("Offline is the new luxury.", None, "detox"),
    ("Almost everything will work again if you unplug it for a few minutes, including you.", Some("Anne Lamott"), "detox"),
    ("Technology is a useful servant but a dangerous master.", Some("Christian Lous Lange"), "technology"),
    ("The richest people invest in the one thing money can't buy: attention.", None, "focus"),
    ("Disconnect to reconnect.", None, "detox"),
    ("Your phone has a lock screen. Your attention deserves one too.", None, "focus"),
    ("Silence is not empty, it is full of answers.", None, "mindfulness"),
    ("What you pay attention to becomes your life.", Some("Cal Newport"), "focus"),
    ("The best things in life aren't things.", Some("Art Buchwald"), "mindfulness"),
    ("Be where your feet are.", None, "mindfulness"),
  ];

  for (content, author, category) in quotes {
    quote::ActiveModel {
      content: Set(content.to_string()),
      author: Set(author.map(str::to_string)),
      category: Set(category.to_string()),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    }
    .insert(db)
    .await?;
  }

  Ok(())
}

async fn seed_achievements(db: &DatabaseConnection) -> Result<()> {
  if sv::Achievement::new(db).count().await? > 0 {
    return Ok(());
  }

  info!("Seeding achievements");

  let badges = [
    ("Pierwszy krok", "Ukończ swoje pierwsze wyzwanie.", "footprints", 100),
    ("Rozgrzewka", "Zbierz 500 punktów.", "flame", 500),
    ("Cyfrowy mnich", "Zbierz 1000 punktów.", "lotus", 1000),
    ("Tygodniowa seria", "Utrzymaj serię przez 7 dni z rzędu.", "calendar", 0),
    ("Mistrz ciszy", "Zbierz 2500 punktów.", "trophy", 2500),
  ];

  for (name, description, icon, points_required) in badges {
    achievement::ActiveModel {
      name: Set(name.to_string()),
      description: Set(description.to_string()),
      icon: Set(Some(icon.to_string())),
      points_required: Set(points_required),
      created_at: Set(Utc::now().naive_utc()),
      ..Default::default()
    }
    .insert(db)
    .await?;
  }

  Ok(())
}
