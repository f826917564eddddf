pub mod offer_dto;
