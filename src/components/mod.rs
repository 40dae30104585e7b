pub mod label_nav;
pub mod lazy_image;
pub mod pagination;
pub mod post_card;
pub mod sitemap;
pub mod status;
