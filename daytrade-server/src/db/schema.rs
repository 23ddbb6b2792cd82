//! Schema initializer for the journal tables
//!
//! Every statement is create-if-absent, so running this against an
//! existing database is a no-op.

use sqlx::PgPool;

/// Create all tables and indexes.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Ensuring journal schema...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dt_users (
            id SERIAL PRIMARY KEY,
            username VARCHAR(50) UNIQUE NOT NULL,
            password VARCHAR(255) NOT NULL,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Trade records; derived money fields are caller-supplied
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dt_operacoes (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES dt_users(id) ON DELETE CASCADE,
            data DATE NOT NULL,
            ativo VARCHAR(20) NOT NULL,
            tipo VARCHAR(10) NOT NULL,
            quantidade INTEGER NOT NULL,
            preco_entrada DECIMAL(10,2) NOT NULL,
            preco_saida DECIMAL(10,2) NOT NULL,
            stop_loss DECIMAL(10,2),
            resultado_bruto DECIMAL(10,2),
            corretagem DECIMAL(10,2),
            emolumentos DECIMAL(10,2),
            taxa_liquidacao DECIMAL(10,2),
            custo_total DECIMAL(10,2),
            imposto DECIMAL(10,2),
            resultado_final DECIMAL(10,2),
            observacoes TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One settings row per user
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dt_configuracoes (
            id SERIAL PRIMARY KEY,
            user_id INTEGER UNIQUE NOT NULL REFERENCES dt_users(id) ON DELETE CASCADE,
            capital_total DECIMAL(10,2),
            risco_por_operacao DECIMAL(5,2),
            meta_diaria DECIMAL(10,2),
            perda_maxima_diaria DECIMAL(10,2),
            corretagem_padrao DECIMAL(10,2),
            emolumentos_padrao DECIMAL(5,4),
            taxa_liquidacao_padrao DECIMAL(5,4)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dt_diarios (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES dt_users(id) ON DELETE CASCADE,
            data DATE NOT NULL,
            humor VARCHAR(20),
            disciplina INTEGER,
            acertos TEXT,
            erros TEXT,
            aprendizados TEXT,
            observacoes TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS dt_custos (
            id SERIAL PRIMARY KEY,
            user_id INTEGER NOT NULL REFERENCES dt_users(id) ON DELETE CASCADE,
            data DATE NOT NULL,
            corretagem DECIMAL(10,2) DEFAULT 0,
            emolumentos DECIMAL(10,2) DEFAULT 0,
            registro DECIMAL(10,2) DEFAULT 0,
            irrf DECIMAL(10,2) DEFAULT 0,
            total DECIMAL(10,2) NOT NULL,
            descricao TEXT,
            created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Journal schema ready");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dt_operacoes_user_id ON dt_operacoes(user_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dt_operacoes_data ON dt_operacoes(data)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_dt_diarios_user_id ON dt_diarios(user_id)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn schema_is_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = PgPool::connect(&url).await.expect("connect failed");

        run(&pool).await.expect("first run failed");
        run(&pool).await.expect("second run failed");

        let tables: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM information_schema.tables
            WHERE table_schema = current_schema()
              AND table_name IN ('dt_users', 'dt_operacoes', 'dt_configuracoes', 'dt_diarios', 'dt_custos')
            "#,
        )
        .fetch_one(&pool)
        .await
        .expect("count failed");
        assert_eq!(tables, 5);
    }
}
