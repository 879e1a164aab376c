pub mod s3_blob_storage;
