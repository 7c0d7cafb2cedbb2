use anyhow::{Context, anyhow};
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use recipebook_auth::{Claims, ensure_owner_or};
use recipebook_core::permissions::{DELETE_ANY_RECIPE, UPDATE_ANY_RECIPE};
use recipebook_core::{AppError, PageMeta, PageWindow};
use recipebook_models::recipes::{
    CreateRecipeDto, Ingredient, IngredientDto, Recipe, RecipeDetail, RecipeListResponse,
    RecipeSummary, UpdateRecipeDto,
};

pub struct RecipeService;

impl RecipeService {
    #[instrument(skip(db))]
    pub async fn list_recipes(db: &PgPool, page: i64) -> Result<RecipeListResponse, AppError> {
        let window = PageWindow::for_page(page)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM recipes")
            .fetch_one(db)
            .await
            .context("Cannot get the recipe list")?;

        window.check_bounds(total)?;

        let recipes = sqlx::query_as::<_, RecipeSummary>(
            r#"SELECT id, name, username
               FROM recipes
               ORDER BY name, id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(db)
        .await
        .context("Cannot get the recipe list")?;

        Ok(RecipeListResponse::new(PageMeta::new(&window, total), recipes))
    }

    #[instrument(skip(db))]
    pub async fn get_recipe(db: &PgPool, recipe_id: i64) -> Result<RecipeDetail, AppError> {
        let mut conn = db
            .acquire()
            .await
            .with_context(|| format!("Cannot get the recipe {recipe_id}"))?;

        let recipe = sqlx::query_as::<_, Recipe>(
            "SELECT id, username, name, servings, preparation FROM recipes WHERE id = $1",
        )
        .bind(recipe_id)
        .fetch_optional(&mut *conn)
        .await
        .with_context(|| format!("Cannot get the recipe {recipe_id}"))?
        .ok_or_else(|| recipe_not_found(recipe_id))?;

        let ingredients = load_ingredients(&mut conn, recipe_id)
            .await
            .with_context(|| format!("Cannot get the recipe {recipe_id}"))?;

        Ok(RecipeDetail::new(recipe, ingredients))
    }

    #[instrument(skip(db, dto), fields(name = %dto.name))]
    pub async fn create_recipe(
        db: &PgPool,
        username: &str,
        dto: CreateRecipeDto,
    ) -> Result<i64, AppError> {
        let mut tx = db.begin().await.context("Cannot add new recipe")?;

        let recipe_id: i64 = sqlx::query_scalar(
            r#"INSERT INTO recipes (username, name, servings, preparation)
               VALUES ($1, $2, $3, $4)
               RETURNING id"#,
        )
        .bind(username)
        .bind(&dto.name)
        .bind(dto.servings)
        .bind(&dto.preparation)
        .fetch_one(&mut *tx)
        .await
        .context("Cannot add new recipe")?;

        insert_ingredients(&mut tx, recipe_id, &dto.ingredients)
            .await
            .context("Cannot add new recipe")?;

        tx.commit().await.context("Cannot add new recipe")?;

        info!(recipe_id, username, "recipe created");
        Ok(recipe_id)
    }

    /// Applies the keys present in `dto`. A present ingredient list replaces
    /// the stored one in the same transaction.
    #[instrument(skip(db, claims, dto), fields(caller = %claims.owner()))]
    pub async fn update_recipe(
        db: &PgPool,
        claims: &Claims,
        recipe_id: i64,
        dto: UpdateRecipeDto,
    ) -> Result<(), AppError> {
        let context = || format!("Cannot update recipe {recipe_id}");
        let mut tx = db.begin().await.with_context(context)?;

        let recipe = lock_recipe(&mut tx, recipe_id)
            .await
            .with_context(context)?
            .ok_or_else(|| recipe_not_found(recipe_id))?;

        ensure_owner_or(
            claims,
            &recipe.username,
            UPDATE_ANY_RECIPE,
            "Cannot update recipes of other users",
        )?;

        sqlx::query(
            r#"UPDATE recipes
               SET name = COALESCE($2, name),
                   servings = COALESCE($3, servings),
                   preparation = COALESCE($4, preparation)
               WHERE id = $1"#,
        )
        .bind(recipe_id)
        .bind(&dto.name)
        .bind(dto.servings)
        .bind(&dto.preparation)
        .execute(&mut *tx)
        .await
        .with_context(context)?;

        if let Some(ingredients) = &dto.ingredients {
            sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
                .bind(recipe_id)
                .execute(&mut *tx)
                .await
                .with_context(context)?;

            insert_ingredients(&mut tx, recipe_id, ingredients)
                .await
                .with_context(context)?;
        }

        tx.commit().await.with_context(context)?;

        info!(recipe_id, "recipe updated");
        Ok(())
    }

    /// Deletes a recipe and its ingredients.
    ///
    /// Checks run in a fixed order: existence, menu references, ownership.
    #[instrument(skip(db, claims), fields(caller = %claims.owner()))]
    pub async fn delete_recipe(
        db: &PgPool,
        claims: &Claims,
        recipe_id: i64,
    ) -> Result<(), AppError> {
        let context = || format!("Cannot delete the recipe {recipe_id}");
        let mut tx = db.begin().await.with_context(context)?;

        let recipe = lock_recipe(&mut tx, recipe_id)
            .await
            .with_context(context)?
            .ok_or_else(|| recipe_not_found(recipe_id))?;

        let in_use: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM menu_recipes WHERE recipe_id = $1)")
                .bind(recipe_id)
                .fetch_one(&mut *tx)
                .await
                .with_context(context)?;
        if in_use {
            return Err(recipe_in_use(recipe_id));
        }

        ensure_owner_or(
            claims,
            &recipe.username,
            DELETE_ANY_RECIPE,
            "Cannot delete recipes of other users",
        )?;

        sqlx::query("DELETE FROM ingredients WHERE recipe_id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .with_context(context)?;

        sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(recipe_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                // A menu may have picked the recipe up after the check above.
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_foreign_key_violation()
                {
                    return recipe_in_use(recipe_id);
                }
                AppError::internal(anyhow::Error::new(e).context(context()))
            })?;

        tx.commit().await.with_context(context)?;

        info!(recipe_id, "recipe deleted");
        Ok(())
    }
}

fn recipe_not_found(recipe_id: i64) -> AppError {
    AppError::not_found(anyhow!("Recipe {recipe_id} not found"))
}

fn recipe_in_use(recipe_id: i64) -> AppError {
    AppError::forbidden(anyhow!(
        "Cannot delete recipe {recipe_id} because it is used in menus"
    ))
}

async fn lock_recipe(
    conn: &mut PgConnection,
    recipe_id: i64,
) -> Result<Option<Recipe>, sqlx::Error> {
    sqlx::query_as::<_, Recipe>(
        "SELECT id, username, name, servings, preparation FROM recipes WHERE id = $1 FOR UPDATE",
    )
    .bind(recipe_id)
    .fetch_optional(conn)
    .await
}

async fn load_ingredients(
    conn: &mut PgConnection,
    recipe_id: i64,
) -> Result<Vec<Ingredient>, sqlx::Error> {
    sqlx::query_as::<_, Ingredient>(
        "SELECT name, amount FROM ingredients WHERE recipe_id = $1 ORDER BY position",
    )
    .bind(recipe_id)
    .fetch_all(conn)
    .await
}

async fn insert_ingredients(
    conn: &mut PgConnection,
    recipe_id: i64,
    ingredients: &[IngredientDto],
) -> Result<(), sqlx::Error> {
    for (position, ingredient) in ingredients.iter().enumerate() {
        sqlx::query(
            r#"INSERT INTO ingredients (recipe_id, position, name, amount)
               VALUES ($1, $2, $3, $4)"#,
        )
        .bind(recipe_id)
        .bind(position as i32)
        .bind(&ingredient.name)
        .bind(ingredient.amount)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
