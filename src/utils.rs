pub mod clonecell;
pub mod copyhashmap;
pub mod numcell;
pub mod smallmap;
