use super::Planner;

use tabula_core::Result;
use tabula_sql::Statement;

impl Planner<'_> {
    /// `CREATE TABLE` statements for the tables `ty` declares: its own
    /// entity table, then its own primitive list tables. Inherited tables
    /// belong to the ancestor that declares them.
    pub fn create_table(&self, ty: &str) -> Result<String> {
        let mapping = self.schema.ty(ty)?;

        let own_lists = mapping
            .list_tables
            .iter()
            .copied()
            .filter(|table| self.schema.table(*table).owner() == mapping.id);

        let sql = std::iter::once(mapping.table)
            .chain(own_lists)
            .map(|table| self.serialize(Statement::create_table(self.schema.table(table))))
            .collect::<Vec<_>>()
            .join("\n");

        log::debug!("planned create table for `{ty}`: {sql}");

        Ok(sql)
    }
}
