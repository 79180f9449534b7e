use std::{
    collections::{HashMap, HashSet},
    io::Write,
};

use clap::{Args, Parser};
use eyre::Context;
use kmedia::{
    FromSqlxRow,
    models::{
        catalog::{self, Catalog},
        container::{self, Container},
        label::Label,
    },
    prelude::*,
    query::parse::ParseFromRow,
};
use kmedia_sqlparse::db::{get_database_url, is_postgres_url};
use sqlx::{Connection, PgConnection};
use tracing::{debug, info};

#[derive(Args, Debug)]
pub struct Database {
    /// The URL to the database to read from. If left unset, will be pulled from the
    /// `DATABASE_URL` environment variable, or a corresponding `.env` file instead.
    #[arg(short, long, value_name = "DATABASE_URL")]
    database_url: Option<String>,
}

impl Database {
    async fn connect(&self) -> eyre::Result<PgConnection> {
        let Some(database_url) = self.database_url.clone().or_else(get_database_url) else {
            return Err(eyre::eyre!(
                "Missing database URL, either set the `DATABASE_URL` environment variable, or specify it manually via --database-url [URL]"
            ));
        };

        if !is_postgres_url(&database_url) {
            return Err(eyre::eyre!(
                "Unsupported database, ensure the connection string starts with `postgres://`."
            ));
        }

        PgConnection::connect(&database_url)
            .await
            .context("Failed to connect to database")
    }
}

fn print_lines(lines: &[String]) -> eyre::Result<()> {
    let mut stdout = std::io::stdout().lock();

    for line in lines {
        writeln!(stdout, "{line}").context("Failed to write output")?;
    }

    Ok(())
}

/// List every language with the number of containers in it
#[derive(Parser, Debug)]
pub struct ShowLanguages {
    #[command(flatten)]
    database: Database,
}

#[derive(FromSqlxRow, Debug, Default)]
struct LanguageUsage {
    code3: Option<String>,
    locale: Option<String>,
    #[kmedia(column = "language")]
    name: Option<String>,
    containers: i64,
}

const LANGUAGE_USAGE: &str = "SELECT \"languages\".\"code3\", \"languages\".\"locale\", \
                              \"languages\".\"language\", COUNT(\"containers\".\"id\") AS \"containers\" \
                              FROM \"languages\" LEFT JOIN \"containers\" \
                              ON \"containers\".\"lang_id\" = \"languages\".\"code3\" \
                              GROUP BY \"languages\".\"id\" ORDER BY \"languages\".\"code3\"";

impl ShowLanguages {
    pub async fn run(&self) -> eyre::Result<()> {
        let mut conn = self.database.connect().await?;

        debug!(target: "kmedia::sql", sql = LANGUAGE_USAGE, "language usage");
        let languages = sqlx::query(LANGUAGE_USAGE)
            .fetch_all(&mut conn)
            .await
            .context("Failed to list languages")?
            .iter()
            .map(LanguageUsage::parse_from_row)
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to read language usage")?;

        print_lines(&languages.iter().map(language_line).collect::<Vec<_>>())?;
        info!("{} languages", languages.len());

        Ok(())
    }
}

fn language_line(usage: &LanguageUsage) -> String {
    format!(
        "{:<4} {:<8} {:<24} {:>8}",
        usage.code3.as_deref().unwrap_or("-"),
        usage.locale.as_deref().unwrap_or("-"),
        usage.name.as_deref().unwrap_or("-"),
        usage.containers,
    )
}

/// Print the catalog hierarchy
#[derive(Parser, Debug)]
pub struct CatalogTree {
    #[command(flatten)]
    database: Database,

    /// Only print the catalog with this id and everything below it.
    #[arg(short, long, value_name = "ID")]
    root: Option<i32>,
}

impl CatalogTree {
    pub async fn run(&self) -> eyre::Result<()> {
        let mut conn = self.database.connect().await?;

        if let Some(root) = self.root {
            if !catalog::Entity::exists_by_key(&mut conn, root)
                .await
                .context("Failed to look up root catalog")?
            {
                return Err(eyre::eyre!("There is no catalog with id {root}"));
            }
        }

        let catalogs = catalog::Entity::find()
            .order_by::<catalog::columns::Catorder>(Order::Asc)
            .order_by::<catalog::columns::Name>(Order::Asc)
            .all(&mut conn)
            .await
            .context("Failed to list catalogs")?;

        print_lines(&render_tree(&catalogs, self.root))
    }
}

/// Indented lines for the catalogs below `root`, or for the whole forest. `catalogs` is expected
/// in sibling order.
fn render_tree(catalogs: &[Catalog], root: Option<i32>) -> Vec<String> {
    let mut children: HashMap<Option<i32>, Vec<&Catalog>> = HashMap::new();
    for catalog in catalogs {
        children.entry(catalog.parent_id).or_default().push(catalog);
    }

    let mut stack = match root {
        Some(id) => catalogs
            .iter()
            .filter(|e| e.id == id)
            .map(|e| (e, 0))
            .collect::<Vec<_>>(),
        None => children
            .get(&None)
            .map(|e| e.iter().rev().map(|e| (*e, 0)).collect())
            .unwrap_or_default(),
    };

    let mut lines = vec![];
    let mut seen = HashSet::new();

    while let Some((catalog, depth)) = stack.pop() {
        // Cycles in parent_id would otherwise never end.
        if !seen.insert(catalog.id) {
            continue;
        }

        lines.push(format!(
            "{}{} [{}]{}",
            "  ".repeat(depth),
            catalog.name,
            catalog.id,
            if catalog.secure > 0 { " (secure)" } else { "" }
        ));

        if let Some(below) = children.get(&Some(catalog.id)) {
            stack.extend(below.iter().rev().map(|e| (*e, depth + 1)));
        }
    }

    lines
}

/// Print a container with its descriptions, labels, catalogs and files
#[derive(Parser, Debug)]
pub struct ShowContainer {
    #[command(flatten)]
    database: Database,

    /// The id of the container.
    id: i32,
}

impl ShowContainer {
    pub async fn run(&self) -> eyre::Result<()> {
        let mut conn = self.database.connect().await?;

        let mut found = container::Entity::find_by_key(&mut conn, self.id, &[])
            .await
            .with_context(|| format!("Failed to load container {}", self.id))?;

        let models = std::slice::from_mut(&mut found);
        Container::load_lang(&mut conn, models).await?;
        Container::load_container_descriptions(&mut conn, models).await?;
        Container::load_labels(&mut conn, models).await?;
        Container::load_catalogs(&mut conn, models).await?;
        Container::load_file_assets(&mut conn, models).await?;
        Label::load_label_descriptions(&mut conn, &mut found.r.labels).await?;

        print_lines(&describe_container(&found))
    }
}

fn describe_container(container: &Container) -> Vec<String> {
    let mut lines = vec![format!(
        "{} [{}]",
        container.name.as_deref().unwrap_or("(unnamed)"),
        container.id
    )];

    if let Some(lang) = &container.r.lang {
        lines.push(format!(
            "  language: {}",
            lang.language.as_deref().unwrap_or("-")
        ));
    }
    if let Some(filmdate) = container.filmdate {
        lines.push(format!("  filmed: {}", filmdate.date()));
    }
    if let Some(secs) = container.playtime_secs {
        lines.push(format!(
            "  playtime: {}:{:02}:{:02}",
            secs / 3600,
            secs % 3600 / 60,
            secs % 60
        ));
    }

    lines.push("  descriptions:".to_string());
    for description in &container.r.container_descriptions {
        lines.push(format!(
            "    [{}] {}",
            description.lang_id.as_deref().unwrap_or("-"),
            description.container_desc.as_deref().unwrap_or("")
        ));
    }

    lines.push("  labels:".to_string());
    for label in &container.r.labels {
        let text = label
            .r
            .label_descriptions
            .iter()
            .filter_map(|e| e.text.as_deref())
            .collect::<Vec<_>>()
            .join(" / ");
        lines.push(format!("    {} [{}]", text, label.id));
    }

    lines.push("  catalogs:".to_string());
    for catalog in &container.r.catalogs {
        lines.push(format!("    {} [{}]", catalog.name, catalog.id));
    }

    lines.push("  files:".to_string());
    for file in &container.r.file_assets {
        lines.push(format!(
            "    {} ({}, {})",
            file.name.as_deref().unwrap_or("-"),
            file.asset_type_id.as_deref().unwrap_or("-"),
            file.lang_id.as_deref().unwrap_or("-")
        ));
    }

    lines
}

#[cfg(test)]
mod test {
    use kmedia::models::{
        catalog::Catalog, container::Container, container_description::ContainerDescription,
        file_asset::FileAsset, label::Label, label_description::LabelDescription,
    };

    use super::{LanguageUsage, describe_container, language_line, render_tree};

    fn catalog(id: i32, parent_id: Option<i32>, name: &str) -> Catalog {
        Catalog {
            id,
            parent_id,
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_tree() {
        let catalogs = vec![
            catalog(1, None, "Lessons"),
            catalog(2, Some(1), "Morning"),
            catalog(3, Some(2), "2010"),
            catalog(4, Some(1), "Evening"),
            catalog(5, None, "Books"),
        ];

        assert_eq!(
            render_tree(&catalogs, None),
            vec![
                "Lessons [1]",
                "  Morning [2]",
                "    2010 [3]",
                "  Evening [4]",
                "Books [5]",
            ]
        );
        assert_eq!(
            render_tree(&catalogs, Some(2)),
            vec!["Morning [2]", "  2010 [3]"]
        );
        assert!(render_tree(&catalogs, Some(42)).is_empty());
    }

    #[test]
    fn test_render_tree_cycle() {
        let catalogs = vec![catalog(1, Some(2), "A"), catalog(2, Some(1), "B")];

        assert_eq!(render_tree(&catalogs, Some(1)), vec!["A [1]", "  B [2]"]);
    }

    #[test]
    fn test_language_line() {
        let usage = LanguageUsage {
            code3: Some("HEB".to_string()),
            locale: Some("he".to_string()),
            name: Some("Hebrew".to_string()),
            containers: 12,
        };

        assert_eq!(
            language_line(&usage),
            format!("HEB  he       {:<24} {:>8}", "Hebrew", 12)
        );
        assert_eq!(
            language_line(&LanguageUsage::default()),
            format!("-    -        {:<24} {:>8}", "-", 0)
        );
    }

    #[test]
    fn test_describe_container() {
        let mut container = Container {
            id: 7,
            name: Some("lesson_2010-01-01".to_string()),
            playtime_secs: Some(3725),
            ..Default::default()
        };
        container.r.container_descriptions.push(ContainerDescription {
            container_id: 7,
            lang_id: Some("ENG".to_string()),
            container_desc: Some("Morning lesson".to_string()),
            ..Default::default()
        });
        let mut label = Label {
            id: 3,
            ..Default::default()
        };
        label.r.label_descriptions.push(LabelDescription {
            text: Some("Talk".to_string()),
            ..Default::default()
        });
        container.r.labels.push(label);
        container.r.catalogs.push(catalog(1, None, "Lessons"));
        container.r.file_assets.push(FileAsset {
            name: Some("lesson.mp4".to_string()),
            asset_type_id: Some("video".to_string()),
            lang_id: Some("ENG".to_string()),
            ..Default::default()
        });

        assert_eq!(
            describe_container(&container),
            vec![
                "lesson_2010-01-01 [7]",
                "  playtime: 1:02:05",
                "  descriptions:",
                "    [ENG] Morning lesson",
                "  labels:",
                "    Talk [3]",
                "  catalogs:",
                "    Lessons [1]",
                "  files:",
                "    lesson.mp4 (video, ENG)",
            ]
        );
    }
}
