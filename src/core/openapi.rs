use utoipa::{Modify, OpenApi};

use crate::features::catalog::{dtos as catalog_dtos, handlers as catalog_handlers};
use crate::features::notifications::{
    dtos as notifications_dtos, handlers as notifications_handlers,
};
use crate::features::posts::{dtos as posts_dtos, handlers as posts_handlers};
use crate::features::products::{dtos as products_dtos, handlers as products_handlers};
use crate::features::quotations::{dtos as quotations_dtos, handlers as quotations_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers};
use crate::shared::types::ApiResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        users_handlers::login,
        // Users
        users_handlers::list_users,
        users_handlers::get_user,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
        // Products
        products_handlers::list_products,
        products_handlers::list_product_categories,
        products_handlers::create_product,
        products_handlers::update_product,
        products_handlers::delete_product,
        // Quotations
        quotations_handlers::list_quotations,
        quotations_handlers::create_quotation,
        quotations_handlers::update_quotation,
        quotations_handlers::update_quotation_status,
        quotations_handlers::delete_quotation,
        // Posts
        posts_handlers::list_posts,
        posts_handlers::create_post,
        posts_handlers::update_post,
        posts_handlers::delete_post,
        // Reference data
        catalog_handlers::list_catalog_entries,
        catalog_handlers::list_frames,
        catalog_handlers::list_categories,
        catalog_handlers::list_prices,
        catalog_handlers::update_price,
        // Notifications
        notifications_handlers::send_quotation_email,
        notifications_handlers::send_inquiry,
    ),
    components(
        schemas(
            // Users
            users_dtos::UserResponseDto,
            users_dtos::CreateUserDto,
            users_dtos::UpdateUserDto,
            users_dtos::LoginDto,
            ApiResponse<users_dtos::UserResponseDto>,
            ApiResponse<Vec<users_dtos::UserResponseDto>>,
            // Products
            products_dtos::ProductResponseDto,
            ApiResponse<products_dtos::ProductResponseDto>,
            ApiResponse<Vec<products_dtos::ProductResponseDto>>,
            ApiResponse<Vec<String>>,
            // Quotations
            quotations_dtos::QuotationResponseDto,
            quotations_dtos::UpdateStatusDto,
            ApiResponse<quotations_dtos::QuotationResponseDto>,
            ApiResponse<Vec<quotations_dtos::QuotationResponseDto>>,
            // Posts
            posts_dtos::PostResponseDto,
            ApiResponse<posts_dtos::PostResponseDto>,
            ApiResponse<Vec<posts_dtos::PostResponseDto>>,
            // Reference data
            catalog_dtos::CatalogEntryDto,
            catalog_dtos::FrameDto,
            catalog_dtos::CategoryDto,
            catalog_dtos::PriceEntryDto,
            catalog_dtos::UpdatePriceDto,
            ApiResponse<Vec<catalog_dtos::CatalogEntryDto>>,
            ApiResponse<Vec<catalog_dtos::FrameDto>>,
            ApiResponse<Vec<catalog_dtos::CategoryDto>>,
            ApiResponse<Vec<catalog_dtos::PriceEntryDto>>,
            ApiResponse<catalog_dtos::PriceEntryDto>,
            // Notifications
            notifications_dtos::InquiryDto,
        )
    ),
    tags(
        (name = "auth", description = "Credential checks"),
        (name = "users", description = "User account management"),
        (name = "products", description = "Product catalog"),
        (name = "quotations", description = "Quotations and their PDF documents"),
        (name = "posts", description = "Blog posts"),
        (name = "catalog", description = "Read-mostly reference data"),
        (name = "notifications", description = "Transactional email"),
    ),
    info(
        title = "Vidrio al Arte API",
        version = "0.1.0",
        description = "Catalog, quotation and blog API for Vidrio al Arte",
    )
)]
pub struct ApiDoc;

/// Overrides the generated OpenAPI info block with values from configuration
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
