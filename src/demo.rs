//! The fixed car-dealership statement sequence.

/// Whether a statement runs transactionally or as a read-only report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementMode {
    Write,
    ReadOnly,
}

/// One statement of the batch: SQL text plus the human-readable
/// description (writes) or report title (reads).
#[derive(Debug, Clone)]
pub struct StatementRequest {
    pub sql: String,
    pub description: String,
    pub mode: StatementMode,
}

impl StatementRequest {
    pub fn write(sql: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            description: description.into(),
            mode: StatementMode::Write,
        }
    }

    pub fn read_only(sql: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            description: title.into(),
            mode: StatementMode::ReadOnly,
        }
    }
}

/// The ten demo operations, in program order. Operations 1 and 10 are an
/// insert/delete pair over the same client row, so a full run leaves the
/// `clients` table as it found it.
pub fn dealership_demo() -> Vec<StatementRequest> {
    vec![
        // 1. INSERT: add a client row.
        StatementRequest::write(
            "INSERT INTO clients (full_name, city) VALUES ('Елена Волкова', 'Екатеринбург');",
            "Insert client: Elena Volkova",
        ),
        // 2. UPDATE: reprice one car by VIN.
        StatementRequest::write(
            "UPDATE cars SET price = 2450000.00 WHERE vin = 'VIN123456789TOY1';",
            "Update Camry price (VIN: VIN123...)",
        ),
        // 3. Filtered SELECT.
        StatementRequest::read_only(
            "SELECT vin, year_produced FROM cars WHERE year_produced < 2023;",
            "Cars produced before 2023",
        ),
        // 4. INNER JOIN.
        StatementRequest::read_only(
            "SELECT m.name AS Модель, man.name AS Производитель, man.country AS Страна \
             FROM models m \
             JOIN manufacturers man ON m.manufacturer_id = man.id;",
            "Models and their manufacturers",
        ),
        // 5. LEFT JOIN with NULL filter.
        StatementRequest::read_only(
            "SELECT c.full_name AS Имя FROM clients c \
             LEFT JOIN sales s ON c.id = s.client_id \
             WHERE s.id IS NULL;",
            "Clients with no purchases",
        ),
        // 6. COUNT + GROUP BY.
        StatementRequest::read_only(
            "SELECT man.name AS Производитель, COUNT(m.id) AS Количество_моделей \
             FROM manufacturers man \
             JOIN models m ON man.id = m.manufacturer_id \
             GROUP BY man.name;",
            "Model count per manufacturer",
        ),
        // 7. Four-table join, ordered by sale date.
        StatementRequest::read_only(
            "SELECT cl.full_name AS Клиент, man.name AS Бренд, mo.name AS Модель, \
             ca.year_produced AS Год_выпуска, s.sale_date AS Дата_продажи \
             FROM sales s \
             JOIN cars ca ON s.car_id = ca.id \
             JOIN models mo ON ca.model_id = mo.id \
             JOIN manufacturers man ON mo.manufacturer_id = man.id \
             JOIN clients cl ON s.client_id = cl.id \
             ORDER BY s.sale_date;",
            "Sales history",
        ),
        // 8. HAVING after aggregation.
        StatementRequest::read_only(
            "SELECT man.name AS Производитель, COUNT(m.id) AS Количество \
             FROM manufacturers man \
             JOIN models m ON man.id = m.manufacturer_id \
             GROUP BY man.name \
             HAVING COUNT(m.id) > 1;",
            "Manufacturers with more than one model",
        ),
        // 9. Nested subqueries.
        StatementRequest::read_only(
            "SELECT vin AS VIN, year_produced AS Год_выпуска FROM cars \
             WHERE model_id IN ( \
                 SELECT id FROM models \
                 WHERE manufacturer_id IN ( \
                     SELECT id FROM manufacturers WHERE country = 'Japan' \
                 ) \
             ) AND year_produced > 2022;",
            "Japanese cars produced after 2022",
        ),
        // 10. DELETE: remove the row inserted by operation 1.
        StatementRequest::write(
            "DELETE FROM clients WHERE full_name = 'Елена Волкова';",
            "Cleanup: remove test client",
        ),
    ]
}
