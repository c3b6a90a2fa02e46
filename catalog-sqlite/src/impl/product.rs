use crate::{Db, types::ProductRow};
use catalog_core::{
    models::{NewProduct, Product, ProductData, ProductId, SortOrder},
    ports::ProductRepository,
};

impl ProductRepository for Db {
    async fn query_products(&self, order: SortOrder) -> Result<Vec<Product>, Self::Error> {
        let sql = match order {
            SortOrder::Ascending => {
                "select id, name, price, disponible from productos order by id asc"
            }
            SortOrder::Descending => {
                "select id, name, price, disponible from productos order by id desc"
            }
        };

        let rows = sqlx::query_as::<_, ProductRow>(sql)
            .fetch_all(&self.reader)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn get_product(&self, product_id: ProductId) -> Result<Option<Product>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            select
                id, name, price, disponible
            from
                productos
            where
                id = $1
            "#,
        )
        .bind(product_id.0)
        .fetch_optional(&self.reader)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, Self::Error> {
        let ProductData {
            name,
            price,
            disponible,
        } = product.into();

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            insert into
                productos (name, price, disponible)
            values
                ($1, $2, $3)
            returning
                id, name, price, disponible
            "#,
        )
        .bind(name)
        .bind(price)
        .bind(disponible)
        .fetch_one(&self.writer)
        .await?;

        Ok(row.into())
    }

    async fn update_product(
        &self,
        product_id: ProductId,
        data: ProductData,
    ) -> Result<Option<Product>, Self::Error> {
        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            update
                productos
            set
                name = $1,
                price = $2,
                disponible = $3
            where
                id = $4
            returning
                id, name, price, disponible
            "#,
        )
        .bind(data.name)
        .bind(data.price)
        .bind(data.disponible)
        .bind(product_id.0)
        .fetch_optional(&self.writer)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn delete_product(&self, product_id: ProductId) -> Result<bool, Self::Error> {
        let result = sqlx::query("delete from productos where id = $1")
            .bind(product_id.0)
            .execute(&self.writer)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
