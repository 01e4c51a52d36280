pub mod cors_fairing;
