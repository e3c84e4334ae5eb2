mod entropy_quality;
mod generator_quality;
