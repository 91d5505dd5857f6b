use crate::db::Database;
use crate::error::{GreenhouseError, Result};
use crate::logic::RuleRepository;
use crate::models::{Category, PlantInfo, Rule, RuleTier, SeedData, TimeOfDay};
use rusqlite::{params, OptionalExtension, Row};

const RULE_COLUMNS: &str =
    "rule_id, name, tier, plant_type, humidity_level, temperature_level, time_of_day, action";

/// Rule as stored, before label columns are parsed.
struct RuleRow {
    rule_id: String,
    name: String,
    tier: String,
    plant_type: String,
    humidity_level: String,
    temperature_level: Option<String>,
    time_of_day: Option<String>,
    action: String,
}

fn row_to_rule_row(row: &Row) -> rusqlite::Result<RuleRow> {
    Ok(RuleRow {
        rule_id: row.get("rule_id")?,
        name: row.get("name")?,
        tier: row.get("tier")?,
        plant_type: row.get("plant_type")?,
        humidity_level: row.get("humidity_level")?,
        temperature_level: row.get("temperature_level")?,
        time_of_day: row.get("time_of_day")?,
        action: row.get("action")?,
    })
}

impl RuleRow {
    fn into_rule(self) -> Result<Rule> {
        let invalid = |column: &str, value: &str| {
            GreenhouseError::InvalidData(format!(
                "rule '{}' has unknown {} '{}'",
                self.rule_id, column, value
            ))
        };

        let tier = RuleTier::from_str(&self.tier).ok_or_else(|| invalid("tier", &self.tier))?;
        let humidity_level = Category::from_str(&self.humidity_level)
            .ok_or_else(|| invalid("humidity_level", &self.humidity_level))?;
        let temperature_level = match &self.temperature_level {
            Some(t) => Some(Category::from_str(t).ok_or_else(|| invalid("temperature_level", t))?),
            None => None,
        };
        let time_of_day = match &self.time_of_day {
            Some(t) => Some(TimeOfDay::from_str(t).ok_or_else(|| invalid("time_of_day", t))?),
            None => None,
        };

        Ok(Rule {
            id: self.rule_id,
            name: self.name,
            tier,
            plant_type: self.plant_type,
            humidity_level,
            temperature_level,
            time_of_day,
            action: self.action,
        })
    }
}

// Rule Queries

impl Database {
    fn query_first_rule(&self, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Option<Rule>> {
        let row = self.with_conn(|conn| {
            conn.query_row(sql, params, row_to_rule_row)
                .optional()
                .map_err(Into::into)
        })?;
        row.map(RuleRow::into_rule).transpose()
    }

    pub fn rule_count(&self) -> Result<i64> {
        self.with_conn(|conn| {
            Ok(conn.query_row("SELECT COUNT(*) FROM rules", [], |row| row.get(0))?)
        })
    }
}

impl RuleRepository for Database {
    fn find_basic(&self, plant_type: &str, humidity_level: Category) -> Result<Option<Rule>> {
        let sql = format!(
            "SELECT {} FROM rules \
             WHERE tier = 'basic' AND plant_type = ?1 AND humidity_level = ?2 \
             ORDER BY id LIMIT 1",
            RULE_COLUMNS
        );
        self.query_first_rule(&sql, params![plant_type, humidity_level.as_str()])
    }

    fn find_advanced(
        &self,
        plant_type: &str,
        humidity_level: Category,
        temperature_level: Category,
        time_of_day: TimeOfDay,
    ) -> Result<Option<Rule>> {
        let sql = format!(
            "SELECT {} FROM rules \
             WHERE tier = 'advanced' AND plant_type = ?1 AND humidity_level = ?2 \
               AND (temperature_level IS NULL OR temperature_level = ?3) \
               AND (time_of_day IS NULL OR time_of_day = ?4) \
             ORDER BY id LIMIT 1",
            RULE_COLUMNS
        );
        self.query_first_rule(
            &sql,
            params![
                plant_type,
                humidity_level.as_str(),
                temperature_level.as_str(),
                time_of_day.as_str()
            ],
        )
    }

    fn seed(&self, seed: &SeedData) -> Result<()> {
        seed.validate()?;

        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute_batch(
                r#"
                DELETE FROM plants;
                DELETE FROM plant_categories;
                DELETE FROM rules;
                "#,
            )?;

            {
                let mut insert_rule = tx.prepare(
                    r#"
                    INSERT INTO rules
                        (rule_id, name, tier, plant_type, humidity_level,
                         temperature_level, time_of_day, action)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    "#,
                )?;
                for rule in &seed.rules {
                    insert_rule.execute(params![
                        rule.id,
                        rule.name,
                        rule.tier.as_str(),
                        rule.plant_type,
                        rule.humidity_level.as_str(),
                        rule.temperature_level.map(|t| t.as_str()),
                        rule.time_of_day.map(|t| t.as_str()),
                        rule.action,
                    ])?;
                }

                let mut insert_category = tx.prepare(
                    "INSERT INTO plant_categories (name, growth_days) VALUES (?1, ?2)",
                )?;
                let mut insert_plant =
                    tx.prepare("INSERT INTO plants (name, category_id) VALUES (?1, ?2)")?;
                for category in &seed.plant_categories {
                    insert_category.execute(params![category.name, category.growth_days])?;
                    let category_id = tx.last_insert_rowid();
                    for plant in &category.plants {
                        insert_plant.execute(params![plant, category_id])?;
                    }
                }
            }

            tx.commit()?;
            Ok(())
        })?;

        tracing::info!(
            rules = seed.rules.len(),
            categories = seed.plant_categories.len(),
            "Seeded rule repository"
        );
        Ok(())
    }

    fn rules(&self) -> Result<Vec<Rule>> {
        let rows = self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM rules \
                 ORDER BY CASE tier WHEN 'basic' THEN 0 ELSE 1 END, id",
                RULE_COLUMNS
            ))?;
            let rows = stmt
                .query_map([], row_to_rule_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })?;
        rows.into_iter().map(RuleRow::into_rule).collect()
    }

    fn plant_info(&self, plant_name: &str) -> Result<Option<PlantInfo>> {
        self.with_conn(|conn| {
            conn.query_row(
                r#"
                SELECT p.name AS name, c.name AS plant_type, c.growth_days AS growth_days
                FROM plants p
                JOIN plant_categories c ON c.id = p.category_id
                WHERE p.name = ?1
                "#,
                [plant_name],
                |row| {
                    Ok(PlantInfo {
                        name: row.get("name")?,
                        plant_type: row.get("plant_type")?,
                        growth_days: row.get("growth_days")?,
                    })
                },
            )
            .optional()
            .map_err(Into::into)
        })
    }
}
