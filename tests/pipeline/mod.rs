mod invariance;
mod scenarios;
mod sequencing;
