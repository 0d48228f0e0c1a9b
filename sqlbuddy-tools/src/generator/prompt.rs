use crate::types::DatabaseKind;

fn schema_rule() -> String {
    "=".repeat(80)
}

fn db_label(kind: DatabaseKind) -> String {
    kind.as_str().to_uppercase()
}

/// Prompt asking for a single query in the layout `ResponseParser` understands
pub fn build_generation_prompt(
    description: &str,
    schema: &str,
    kind: DatabaseKind,
    additional_context: Option<&str>,
) -> String {
    let rule = schema_rule();

    let mut prompt = format!(
        "You are an expert SQL query generator for {db} databases.

Your task is to generate a SQL query based on the user's natural language description.

IMPORTANT RULES:
1. Generate ONLY valid SQL queries for the specified database type
2. Use ONLY tables and columns that exist in the provided schema
3. Follow SQL best practices and optimization techniques
4. Include appropriate JOINs when querying multiple tables
5. Use proper WHERE clauses for filtering
6. Add ORDER BY, LIMIT, or GROUP BY when relevant
7. Ensure the query is safe and doesn't include any destructive operations unless explicitly requested
8. If the request is ambiguous, make reasonable assumptions based on the schema

DATABASE SCHEMA:
{rule}
{schema}
{rule}

",
        db = db_label(kind),
    );

    if let Some(context) = additional_context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str(&format!("ADDITIONAL CONTEXT:\n{}\n\n", context));
    }

    prompt.push_str(&format!(
        "USER REQUEST:
{description}

Please provide your response in the following format:

SQL QUERY:
```sql
[Your SQL query here]
```

EXPLANATION:
[Brief explanation of what the query does and any assumptions made]

TABLES USED:
[List of tables used in the query]

POTENTIAL OPTIMIZATIONS:
[Optional suggestions for query optimization if applicable]"
    ));

    prompt
}

pub fn build_explain_prompt(query: &str, schema: &str, kind: DatabaseKind) -> String {
    let rule = schema_rule();
    format!(
        "You are an expert SQL analyst for {db} databases.

Analyze the following SQL query and provide:
1. A clear explanation of what the query does
2. Performance analysis
3. Potential issues or improvements
4. Tables and columns used

DATABASE SCHEMA:
{rule}
{schema}
{rule}

SQL QUERY TO ANALYZE:
```sql
{query}
```

Please provide your analysis in a structured format.",
        db = db_label(kind),
    )
}

pub fn build_optimize_prompt(query: &str, schema: &str, kind: DatabaseKind) -> String {
    let rule = schema_rule();
    format!(
        "You are an expert SQL performance optimizer for {db} databases.

Analyze the following SQL query and provide an optimized version.

Consider:
- Index usage
- JOIN optimization
- Subquery optimization
- Proper use of WHERE clauses
- Avoiding SELECT *
- Using appropriate data types

DATABASE SCHEMA:
{rule}
{schema}
{rule}

ORIGINAL QUERY:
```sql
{query}
```

Provide:
1. OPTIMIZED QUERY (in SQL code block)
2. Explanation of optimizations made
3. Performance impact estimation",
        db = db_label(kind),
    )
}
