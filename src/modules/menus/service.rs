use anyhow::{Context, anyhow};
use sqlx::{PgConnection, PgPool};
use tracing::{info, instrument};

use recipebook_auth::{Claims, ensure_owner_or};
use recipebook_core::permissions::{DELETE_ANY_MENU, UPDATE_ANY_MENU};
use recipebook_core::{AppError, PageMeta, PageWindow};
use recipebook_models::menus::{
    CreateMenuDto, DishDto, Menu, MenuDetail, MenuListResponse, MenuSummary, UpdateMenuDto,
};
use recipebook_models::recipes::RecipeSummary;

pub struct MenuService;

impl MenuService {
    #[instrument(skip(db))]
    pub async fn list_menus(db: &PgPool, page: i64) -> Result<MenuListResponse, AppError> {
        let window = PageWindow::for_page(page)?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menus")
            .fetch_one(db)
            .await
            .context("Cannot get the menu list")?;

        window.check_bounds(total)?;

        let menus = sqlx::query_as::<_, MenuSummary>(
            r#"SELECT id, name, username
               FROM menus
               ORDER BY name, id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(window.limit())
        .bind(window.offset())
        .fetch_all(db)
        .await
        .context("Cannot get the menu list")?;

        Ok(MenuListResponse::new(PageMeta::new(&window, total), menus))
    }

    #[instrument(skip(db))]
    pub async fn get_menu(db: &PgPool, menu_id: i64) -> Result<MenuDetail, AppError> {
        let context = || format!("Cannot get the menu {menu_id}");
        let mut conn = db.acquire().await.with_context(context)?;

        let menu = sqlx::query_as::<_, Menu>("SELECT id, username, name FROM menus WHERE id = $1")
            .bind(menu_id)
            .fetch_optional(&mut *conn)
            .await
            .with_context(context)?
            .ok_or_else(|| menu_not_found(menu_id))?;

        let dishes = sqlx::query_as::<_, RecipeSummary>(
            r#"SELECT r.id, r.name, r.username
               FROM menu_recipes mr
               JOIN recipes r ON r.id = mr.recipe_id
               WHERE mr.menu_id = $1
               ORDER BY r.name, r.id"#,
        )
        .bind(menu_id)
        .fetch_all(&mut *conn)
        .await
        .with_context(context)?;

        Ok(MenuDetail::new(menu, dishes))
    }

    #[instrument(skip(db, dto), fields(name = %dto.name))]
    pub async fn create_menu(
        db: &PgPool,
        username: &str,
        dto: CreateMenuDto,
    ) -> Result<i64, AppError> {
        let context = || "Cannot add new menu";
        let mut tx = db.begin().await.with_context(context)?;

        let menu_id: i64 = sqlx::query_scalar(
            "INSERT INTO menus (username, name) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(&dto.name)
        .fetch_one(&mut *tx)
        .await
        .with_context(context)?;

        attach_dishes(&mut tx, menu_id, &dto.dishes, context).await?;

        tx.commit().await.with_context(context)?;

        info!(menu_id, username, "menu created");
        Ok(menu_id)
    }

    /// Applies the keys present in `dto`. A present dish list replaces the
    /// stored one in the same transaction.
    #[instrument(skip(db, claims, dto), fields(caller = %claims.owner()))]
    pub async fn update_menu(
        db: &PgPool,
        claims: &Claims,
        menu_id: i64,
        dto: UpdateMenuDto,
    ) -> Result<(), AppError> {
        let context = || format!("Cannot update menu {menu_id}");
        let mut tx = db.begin().await.with_context(context)?;

        let menu = lock_menu(&mut tx, menu_id)
            .await
            .with_context(context)?
            .ok_or_else(|| menu_not_found(menu_id))?;

        ensure_owner_or(
            claims,
            &menu.username,
            UPDATE_ANY_MENU,
            "Cannot update menus of other users",
        )?;

        if let Some(name) = &dto.name {
            sqlx::query("UPDATE menus SET name = $2 WHERE id = $1")
                .bind(menu_id)
                .bind(name)
                .execute(&mut *tx)
                .await
                .with_context(context)?;
        }

        if let Some(dishes) = &dto.dishes {
            sqlx::query("DELETE FROM menu_recipes WHERE menu_id = $1")
                .bind(menu_id)
                .execute(&mut *tx)
                .await
                .with_context(context)?;

            attach_dishes(&mut tx, menu_id, dishes, context).await?;
        }

        tx.commit().await.with_context(context)?;

        info!(menu_id, "menu updated");
        Ok(())
    }

    /// Deletes a menu. The recipes it references are left untouched.
    #[instrument(skip(db, claims), fields(caller = %claims.owner()))]
    pub async fn delete_menu(db: &PgPool, claims: &Claims, menu_id: i64) -> Result<(), AppError> {
        let context = || format!("Cannot delete the menu {menu_id}");
        let mut tx = db.begin().await.with_context(context)?;

        let menu = lock_menu(&mut tx, menu_id)
            .await
            .with_context(context)?
            .ok_or_else(|| menu_not_found(menu_id))?;

        ensure_owner_or(
            claims,
            &menu.username,
            DELETE_ANY_MENU,
            "Cannot delete menus of other users",
        )?;

        sqlx::query("DELETE FROM menu_recipes WHERE menu_id = $1")
            .bind(menu_id)
            .execute(&mut *tx)
            .await
            .with_context(context)?;

        sqlx::query("DELETE FROM menus WHERE id = $1")
            .bind(menu_id)
            .execute(&mut *tx)
            .await
            .with_context(context)?;

        tx.commit().await.with_context(context)?;

        info!(menu_id, "menu deleted");
        Ok(())
    }
}

fn menu_not_found(menu_id: i64) -> AppError {
    AppError::not_found(anyhow!("Menu {menu_id} not found"))
}

async fn lock_menu(conn: &mut PgConnection, menu_id: i64) -> Result<Option<Menu>, sqlx::Error> {
    sqlx::query_as::<_, Menu>("SELECT id, username, name FROM menus WHERE id = $1 FOR UPDATE")
        .bind(menu_id)
        .fetch_optional(conn)
        .await
}

/// Links each dish's recipe to the menu, in list order.
///
/// The first dish whose recipe does not exist aborts the operation with a
/// 400 naming the dish index, including a recipe deleted concurrently.
/// Repeated recipe ids are stored once.
async fn attach_dishes<C, M>(
    conn: &mut PgConnection,
    menu_id: i64,
    dishes: &[DishDto],
    context: C,
) -> Result<(), AppError>
where
    C: Fn() -> M + Copy,
    M: std::fmt::Display + Send + Sync + 'static,
{
    for (idx, dish) in dishes.iter().enumerate() {
        // Key-share lock keeps the recipe alive until the link is committed.
        let found: Option<i32> =
            sqlx::query_scalar("SELECT 1 FROM recipes WHERE id = $1 FOR KEY SHARE")
                .bind(dish.recipe_id)
                .fetch_optional(&mut *conn)
                .await
                .with_context(context)?;

        if found.is_none() {
            return Err(AppError::bad_request(anyhow!(
                "Recipe {} in dish {idx} not found",
                dish.recipe_id
            )));
        }

        sqlx::query(
            r#"INSERT INTO menu_recipes (menu_id, recipe_id)
               VALUES ($1, $2)
               ON CONFLICT DO NOTHING"#,
        )
        .bind(menu_id)
        .bind(dish.recipe_id)
        .execute(&mut *conn)
        .await
        .with_context(context)?;
    }

    Ok(())
}
